//! DexScreener pair-search client.

use crate::error::FeedError;
use crate::http::FeedHttp;
use crate::models::PairsResponse;
use crate::traits::PairFeed;
use async_trait::async_trait;
use defi_radar_core::FeedConfig;
use serde_json::Value;

/// Default DexScreener API base URL.
pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

const FEED_NAME: &str = "dexscreener";

/// DexScreener API client.
pub struct DexScreenerClient {
    http: FeedHttp,
}

impl DexScreenerClient {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        Ok(Self {
            http: FeedHttp::new(FEED_NAME, &config.dexscreener_base_url, config)?,
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

    /// Searches pairs matching a query term (token symbol or name).
    ///
    /// # Errors
    /// Returns `FeedError` on transport failure, non-2xx status, or a body that
    /// is not a JSON object.
    pub async fn search(&self, term: &str) -> Result<Vec<Value>, FeedError> {
        let path = format!("/latest/dex/search?q={}", urlencoding::encode(term));
        let response: PairsResponse = self.http.get(&path).await?;
        let records = response.into_records();

        tracing::debug!(term = %term, count = records.len(), "Fetched pairs");
        Ok(records)
    }
}

#[async_trait]
impl PairFeed for DexScreenerClient {
    async fn search_pairs(&self, term: &str) -> Result<Vec<Value>, FeedError> {
        self.search(term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> DexScreenerClient {
        DexScreenerClient::new(&FeedConfig::default())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_client_creation() {
        let client = DexScreenerClient::new(&FeedConfig::default()).unwrap();
        assert_eq!(client.base_url(), DEXSCREENER_API_URL);
    }

    #[tokio::test]
    async fn test_search_sends_query_term() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .and(query_param("q", "pepe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "schemaVersion": "1.0.0",
                "pairs": [{
                    "chainId": 1,
                    "baseToken": { "symbol": "PEPE" },
                    "priceUsd": "0.0000091",
                    "liquidity": { "usd": 4200000 },
                    "volume": { "h24": 1800000 },
                    "priceChange": { "h24": 2.4 }
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let pairs = client(&mock_server).search("pepe").await.unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0]["baseToken"]["symbol"], "PEPE");
    }

    #[tokio::test]
    async fn test_search_encodes_term() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .and(query_param("q", "baby doge"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "pairs": [] })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let pairs = client(&mock_server).search("baby doge").await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_null_pairs_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "pairs": null })),
            )
            .mount(&mock_server)
            .await;

        let pairs = client(&mock_server).search("shiba").await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).search("bonk").await.unwrap_err();
        assert_eq!(err.kind(), FeedErrorKind::FeedUnavailable);
        assert!(err.to_string().contains("429"));
    }
}
