//! HTTP table source
//!
//! Fetches `GET {base_url}/language/{language}/{namespace}.json?v={millis}`.
//! The `v` parameter is the current Unix time in milliseconds so that
//! intermediate caches never serve a stale table.

use crate::TranslationTable;
use crate::error::{LoadError, LoadResult};
use crate::source::{TableSource, is_safe_segment, table_from_json};
use async_trait::async_trait;
use reqwest::Url;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Loads tables from a web server
#[derive(Clone)]
pub struct HttpSource {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source rooted at `base_url` (e.g. `https://example.org`)
    pub fn new(base_url: &str, timeout: Duration) -> LoadResult<Self> {
        if base_url.trim().is_empty() {
            return Err(LoadError::Config("base URL cannot be empty".to_string()));
        }

        let base_url = Url::parse(base_url.trim())
            .map_err(|e| LoadError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(LoadError::Config(format!(
                "Base URL '{}' cannot have a path",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// URL of one table, cache-busted with `stamp`
    ///
    /// `language` and `namespace` are percent-encoded as single path segments.
    pub fn table_url(&self, language: &str, namespace: &str, stamp: u128) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("language")
                .push(language)
                .push(&format!("{}.json", namespace));
        }
        url.set_query(None);
        url.query_pairs_mut().append_pair("v", &stamp.to_string());
        url
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[async_trait]
impl TableSource for HttpSource {
    async fn fetch(&self, language: &str, namespace: &str) -> LoadResult<TranslationTable> {
        if !is_safe_segment(language) || !is_safe_segment(namespace) {
            return Err(LoadError::Config(format!(
                "invalid table path '{}/{}'",
                language, namespace
            )));
        }

        let url = self.table_url(language, namespace, unix_millis());
        debug!("Fetching translations from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LoadError::Parse(format!("{}: {}", url, e)))?;
        table_from_json(json)
    }

    fn source_name(&self) -> &str {
        "http"
    }
}
