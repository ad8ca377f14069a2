use crate::error::FeedError;
use async_trait::async_trait;
use serde_json::Value;

/// Source of raw yield pool records.
#[async_trait]
pub trait PoolFeed: Send + Sync {
    async fn fetch_pools(&self) -> Result<Vec<Value>, FeedError>;
}

/// Source of raw market pairs, queried one search term at a time.
#[async_trait]
pub trait PairFeed: Send + Sync {
    async fn search_pairs(&self, term: &str) -> Result<Vec<Value>, FeedError>;
}
