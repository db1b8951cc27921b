use std::path::PathBuf;

use clap::Parser;

use crate::cli::LogLevel;

/// Default base URL of the Yandex Disk REST API.
const DEFAULT_API_URL: &str = "https://cloud-api.yandex.net";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Dump a remote drive listing as a GrandPerspective scan file")]
pub struct Cli {
    /// File where to write the scan dump (.gpscan)
    pub output: PathBuf,

    /// File containing the drive API OAuth token
    #[clap(long, short = 't')]
    pub token_file: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Base URL of the drive API
    #[clap(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
}
