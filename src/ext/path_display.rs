use std::path::Path;

/// Renders a path for log and error messages, absolute when possible.
/// Canonicalization fails for paths that do not exist yet (e.g. the
/// output file), so fall back to joining the current directory.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path>> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        let path = self.as_ref();
        if let Ok(canonical) = path.canonicalize() {
            return canonical.display().to_string();
        }
        if path.is_absolute() {
            return path.display().to_string();
        }
        match std::env::current_dir() {
            Ok(current_dir) => current_dir.join(path).display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}
