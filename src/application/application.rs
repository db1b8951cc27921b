use snafu::prelude::*;
use tracing::{info, warn};

use crate::application::RuntimeConfig;
use crate::config::{AccessToken, TokenReadError};
use crate::dump::{DumpWriteError, write_dump_file};
use crate::ext::BestEffortPathExt;
use crate::listing::{DriveClient, ListingError};
use crate::scan::FolderNode;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();

        // Refuse to clobber an earlier dump before touching the network
        ensure!(
            !app_config.output.exists(),
            OutputExistsSnafu {
                file_path: app_config.output.best_effort_path_display(),
            }
        );

        let token = AccessToken::read(&app_config.token_file)
            .await
            .context(TokenSnafu)?;

        let client = DriveClient::new(app_config.api_url.clone(), token);
        let records = client.fetch_all_records().await.context(ListingSnafu)?;
        info!("Fetched {} file records from the listing API", records.len());

        let (root, orphans) = FolderNode::from_records(records);
        for orphan in &orphans {
            warn!(
                "{} record(s) under '{}' could not be placed in the tree; \
                 the listing data is inconsistent",
                orphan.count(),
                orphan.dir_path
            );
            for record in &orphan.records {
                warn!("  orphaned: {record}");
            }
        }
        info!("Placed {} files in the folder tree", root.file_count());

        write_dump_file(&app_config.output, &root)
            .await
            .context(DumpSnafu)?;
        info!(
            "Wrote scan dump to {}",
            app_config.output.best_effort_path_display()
        );

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Output file already exists: {}", file_path))]
    OutputExistsError { file_path: String },
    #[snafu(display("Critical failure encountered while loading the token"))]
    TokenError { source: TokenReadError },
    #[snafu(display("Critical failure encountered while fetching the listing"))]
    ListingError { source: ListingError },
    #[snafu(display("Critical failure encountered while writing the scan dump"))]
    DumpError { source: DumpWriteError },
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    fn config(output: PathBuf, token_file: PathBuf) -> RuntimeConfig {
        RuntimeConfig {
            output,
            token_file,
            api_url: "http://localhost:9".to_owned(),
        }
    }

    #[tokio::test]
    async fn run_refuses_existing_output_file() {
        let existing = NamedTempFile::new().expect("Failed to create temp file");

        let result = Application::run(config(
            existing.path().to_path_buf(),
            PathBuf::from("unused-token.txt"),
        ))
        .await;

        assert!(matches!(
            result,
            Err(ApplicationError::OutputExistsError { .. })
        ));
    }

    #[tokio::test]
    async fn run_fails_before_network_on_missing_token() {
        let result = Application::run(config(
            PathBuf::from("fresh-output.gpscan"),
            PathBuf::from("no/such/token.txt"),
        ))
        .await;

        assert!(matches!(result, Err(ApplicationError::TokenError { .. })));
    }
}
