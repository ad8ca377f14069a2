//! DefiLlama yields client.
//!
//! Fetches the full pool list from the yields API. Records are returned raw;
//! coercion happens per record in [`crate::models::PoolRecord`].

use crate::error::FeedError;
use crate::http::FeedHttp;
use crate::models::PoolsResponse;
use crate::traits::PoolFeed;
use async_trait::async_trait;
use defi_radar_core::FeedConfig;
use serde_json::Value;

/// Default DefiLlama yields API base URL.
pub const YIELDS_API_URL: &str = "https://yields.llama.fi";

const FEED_NAME: &str = "defillama";

/// DefiLlama yields API client.
pub struct YieldsClient {
    http: FeedHttp,
}

impl YieldsClient {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        Ok(Self {
            http: FeedHttp::new(FEED_NAME, &config.yields_base_url, config)?,
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.http.set_base_url(url);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Gets every pool currently listed.
    ///
    /// # Errors
    /// Returns `FeedError` on transport failure, non-2xx status, or a body that
    /// is not a JSON object.
    pub async fn get_pools(&self) -> Result<Vec<Value>, FeedError> {
        let response: PoolsResponse = self.http.get("/pools").await?;
        let records = response.into_records();

        tracing::debug!(count = records.len(), "Fetched yield pools");
        Ok(records)
    }
}

#[async_trait]
impl PoolFeed for YieldsClient {
    async fn fetch_pools(&self) -> Result<Vec<Value>, FeedError> {
        self.get_pools().await
    }
}
