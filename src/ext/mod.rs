mod path_display;

pub use path_display::BestEffortPathExt;
