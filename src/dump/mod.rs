//! Serialization of the folder tree into the GrandPerspective scan dump
//! format, and the staged write of the resulting document.

mod writer;
mod xml;

pub use writer::{DumpWriteError, write_dump_file};
pub use xml::{ScanDumpWriter, escape_text};
