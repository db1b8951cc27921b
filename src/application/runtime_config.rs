use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output: PathBuf,
    pub token_file: PathBuf,
    pub api_url: String,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            output: cli.output,
            token_file: cli.token_file,
            api_url: cli.api_url,
        }
    }
}
