use std::fmt;
use std::path::Path;

use derive_more::Deref;
use snafu::prelude::*;
use tokio::fs;
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Tokens are short strings; anything bigger than this is almost
/// certainly not a token file.
const MAX_TOKEN_FILE_SIZE: u64 = 1024;

/// OAuth token for the drive API, loaded from a file.
#[derive(Clone, Deref)]
pub struct AccessToken(String);

impl AccessToken {
    pub async fn read(path: &Path) -> Result<Self, TokenReadError> {
        debug!("Reading token file: {}", path.best_effort_path_display());

        let metadata = fs::metadata(path).await.context(MissingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        ensure!(
            metadata.len() <= MAX_TOKEN_FILE_SIZE,
            TooBigSnafu {
                file_path: path.best_effort_path_display(),
                size: metadata.len(),
            }
        );

        let contents = fs::read_to_string(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;

        let token = contents.trim();
        ensure!(
            !token.is_empty(),
            EmptySnafu {
                file_path: path.best_effort_path_display(),
            }
        );

        Ok(AccessToken(token.to_owned()))
    }
}

// The token is a credential, keep it out of debug logs and error reports
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Snafu)]
pub enum TokenReadError {
    #[snafu(display("Token file not found: {}", file_path))]
    MissingError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Token file too big ({} bytes): {}", size, file_path))]
    TooBigError { file_path: String, size: u64 },
    #[snafu(display("Failed to read the token file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Token file is empty: {}", file_path))]
    EmptyError { file_path: String },
}
