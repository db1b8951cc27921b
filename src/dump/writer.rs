use std::path::{Path, PathBuf};

use snafu::prelude::*;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tokio::fs;
use tracing::debug;

use crate::dump::ScanDumpWriter;
use crate::ext::BestEffortPathExt;
use crate::scan::FolderNode;

const SCAN_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
const FALLBACK_SCAN_TIME: &str = "1970-01-01T00:00:00Z";

/// Writes the rendered dump for `root` to `path` via a staging file in
/// the same directory, renamed into place only once fully written. The
/// destination never holds a partial document.
pub async fn write_dump_file(path: &Path, root: &FolderNode) -> Result<(), DumpWriteError> {
    let mut buffer = Vec::new();
    ScanDumpWriter::new(&mut buffer)
        .write_dump(root, &current_scan_time())
        .context(RenderSnafu)?;

    let staging = staging_path(path);
    debug!(
        "Writing scan dump via staging file: {}",
        staging.best_effort_path_display()
    );
    if let Err(source) = write_and_rename(&staging, path, &buffer).await {
        let _ = fs::remove_file(&staging).await;
        return Err(DumpWriteError::WriteError {
            file_path: path.best_effort_path_display(),
            source,
        });
    }

    Ok(())
}

async fn write_and_rename(staging: &Path, path: &Path, buffer: &[u8]) -> std::io::Result<()> {
    fs::write(staging, buffer).await?;
    fs::rename(staging, path).await
}

fn staging_path(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".part");

    PathBuf::from(raw)
}

fn current_scan_time() -> String {
    OffsetDateTime::now_utc()
        .format(&SCAN_TIME_FORMAT)
        .unwrap_or_else(|_| FALLBACK_SCAN_TIME.to_owned())
}

#[derive(Debug, Snafu)]
pub enum DumpWriteError {
    #[snafu(display("Failed to render the scan dump"))]
    RenderError { source: std::io::Error },
    #[snafu(display("Failed to write the scan dump to {}", file_path))]
    WriteError {
        file_path: String,
        source: std::io::Error,
    },
}
