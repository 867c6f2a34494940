//! Client for the static host that serves the datasets.
//!
//! The host is a plain static site (GitHub Pages by default) exposing
//! `bloodbank.json`, `donorinfo.json`, `camps.json`, `events.json` and
//! `index.html` side by side. Every request fetches afresh; nothing is cached.

use axum::http::header::CONTENT_TYPE;

use crate::error::ApiError;
use crate::model::{Record, Resource};

/// File describing the API, served at `/`.
const INDEX_FILE: &str = "index.html";

/// Client for fetching datasets from the static host.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    /// Create a client for the host at `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of a file on the static host.
    pub fn file_url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file)
    }

    /// Fetch every record of a resource.
    ///
    /// Fails on network errors, non-2xx statuses, and bodies that are not a
    /// JSON array.
    pub async fn fetch_records(&self, resource: Resource) -> Result<Vec<Record>, ApiError> {
        let url = self.file_url(resource.dataset_file());

        let records = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Record>>()
            .await?;

        tracing::debug!(
            resource = resource.segment(),
            count = records.len(),
            "Dataset fetched"
        );
        Ok(records)
    }

    /// Fetch the HTML page describing the API.
    pub async fn fetch_index(&self) -> Result<String, ApiError> {
        let html = self
            .client
            .get(self.file_url(INDEX_FILE))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}
