use derive_more::Display;

/// Prefix the provider puts in front of every absolute path it reports.
const PROVIDER_PATH_PREFIX: &str = "disk:";

/// One remote file from the drive listing.
///
/// `dir` is the parent-directory prefix of `path` (kept as `/` for files
/// directly under the root, empty for a path with no separator at all)
/// and `basename` is the final path component, so joining `dir` and
/// `basename` with a separator reconstructs `path`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{path}")]
pub struct FileRecord {
    path: String,
    dir: String,
    basename: String,
    size: u64,
}

impl FileRecord {
    pub fn new(raw_path: &str, size: u64) -> Self {
        let path = raw_path
            .strip_prefix(PROVIDER_PATH_PREFIX)
            .unwrap_or(raw_path);
        let (dir, basename) = split_path(path);

        FileRecord {
            path: path.to_owned(),
            dir,
            basename,
            size,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Splits a POSIX-style path into its parent directory and basename.
fn split_path(path: &str) -> (String, String) {
    match path.rfind('/') {
        Some(0) => ("/".to_owned(), path[1..].to_owned()),
        Some(idx) => (path[..idx].to_owned(), path[idx + 1..].to_owned()),
        None => (String::new(), path.to_owned()),
    }
}
