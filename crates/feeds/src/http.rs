//! Rate-limited JSON GET shared by the feed clients.

use crate::error::FeedError;
use defi_radar_core::FeedConfig;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Longest upstream error body kept in a `FeedError::Status`.
const MAX_ERROR_BODY: usize = 256;

pub(crate) struct FeedHttp {
    feed: &'static str,
    http: Client,
    base_url: String,
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl FeedHttp {
    pub(crate) fn new(
        feed: &'static str,
        base_url: &str,
        config: &FeedConfig,
    ) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FeedError::Client)?;

        let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(nonzero!(60u32));
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            feed,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    pub(crate) fn set_base_url(&mut self, url: impl Into<String>) {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the rate limiter, issues a GET and decodes the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(feed = self.feed, "GET {}", url);

        let unavailable = |source| FeedError::Unavailable {
            feed: self.feed,
            source,
        };

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(FeedError::Status {
                feed: self.feed,
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(unavailable)?;
        serde_json::from_str(&text).map_err(|source| FeedError::MalformedPayload {
            feed: self.feed,
            source,
        })
    }
}
