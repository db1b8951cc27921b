use reqwest::{StatusCode, header};
use serde::Deserialize;
use snafu::prelude::*;
use tracing::debug;

use crate::config::AccessToken;
use crate::listing::FileRecord;

const LISTING_ENDPOINT: &str = "/v1/disk/resources/files";
const LISTING_FIELDS: &str = "size,path";
/// Files fetched per request; the loop stops at the first short page.
const PAGE_SIZE: usize = 1000;

/// One page of the flat-listing endpoint, trimmed to the fields we ask for.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub items: Vec<ListingItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingItem {
    pub path: String,
    pub size: u64,
}

/// Client for the drive's paginated file-listing API.
pub struct DriveClient {
    http: reqwest::Client,
    base_url: String,
    token: AccessToken,
}

impl DriveClient {
    pub fn new(base_url: impl Into<String>, token: AccessToken) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        DriveClient {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Walks the whole listing page by page and maps every item to a
    /// [`FileRecord`]. The listing is flat; nesting is reconstructed
    /// later from the record paths.
    pub async fn fetch_all_records(&self) -> Result<Vec<FileRecord>, ListingError> {
        let mut records = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(offset).await?;
            let fetched = page.items.len();
            debug!("offset={}, items={}", offset, fetched);

            records.extend(
                page.items
                    .iter()
                    .map(|item| FileRecord::new(&item.path, item.size)),
            );

            if fetched < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(records)
    }

    async fn fetch_page(&self, offset: usize) -> Result<ListingPage, ListingError> {
        let url = format!("{}{}", self.base_url, LISTING_ENDPOINT);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("limit", PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
                ("fields", LISTING_FIELDS.to_string()),
            ])
            .header(
                header::AUTHORIZATION,
                format!("OAuth {}", self.token.as_str()),
            )
            .send()
            .await
            .context(RequestSnafu { offset })?;

        let status = response.status();
        ensure!(
            status == StatusCode::OK,
            UnexpectedStatusSnafu { offset, status }
        );

        response
            .json::<ListingPage>()
            .await
            .context(DecodeSnafu { offset })
    }
}

#[derive(Debug, Snafu)]
pub enum ListingError {
    #[snafu(display("Listing request at offset {} failed", offset))]
    RequestError {
        offset: usize,
        source: reqwest::Error,
    },
    #[snafu(display("Expected 200 from the listing API at offset {} but got {}", offset, status))]
    UnexpectedStatusError { offset: usize, status: StatusCode },
    #[snafu(display("Failed to decode the listing response at offset {}", offset))]
    DecodeError {
        offset: usize,
        source: reqwest::Error,
    },
}
