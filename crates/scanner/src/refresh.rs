//! One refresh cycle across both feeds.

use crate::aggregator::top_picks;
use crate::classifier::{YieldBuckets, YieldClassifier};
use crate::meme::MemeScanner;
use chrono::{DateTime, Utc};
use defi_radar_core::{AppConfig, MemeMarketEntry, ScannerConfig, SortMode, YieldOpportunity};
use defi_radar_feeds::{DexScreenerClient, FeedError, PairFeed, PoolFeed, YieldsClient};
use serde::Serialize;
use tracing::info;

/// Everything the presentation layer needs from one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RadarSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub sort_mode: SortMode,
    pub buckets: YieldBuckets,
    pub top_picks: Vec<YieldOpportunity>,
    pub memes: Vec<MemeMarketEntry>,
}

/// Runs refresh cycles against a pool feed and a pair feed.
pub struct Radar<P, M> {
    config: ScannerConfig,
    pools: P,
    pairs: M,
}

impl Radar<YieldsClient, DexScreenerClient> {
    /// Builds a radar backed by the live HTTP feeds.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Ok(Self::new(
            config.scanner.clone(),
            YieldsClient::new(&config.feeds)?,
            DexScreenerClient::new(&config.feeds)?,
        ))
    }
}

impl<P: PoolFeed, M: PairFeed> Radar<P, M> {
    #[must_use]
    pub const fn new(config: ScannerConfig, pools: P, pairs: M) -> Self {
        Self { config, pools, pairs }
    }

    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Classifies the yield feed only.
    pub async fn yields(&self) -> YieldBuckets {
        YieldClassifier::new(&self.config)
            .classify_from_feed(&self.pools)
            .await
    }

    /// Scans the pair feed only.
    pub async fn memes(&self) -> Vec<MemeMarketEntry> {
        MemeScanner::new(&self.config).scan_feed(&self.pairs).await
    }

    /// Runs a full cycle. The yield fetch and the pair searches run
    /// concurrently; a failure in either only empties its own section.
    pub async fn refresh(&self) -> RadarSnapshot {
        let (buckets, memes) = tokio::join!(self.yields(), self.memes());
        let top_picks = top_picks(&buckets, self.config.top_picks_limit);

        info!(
            top_picks = top_picks.len(),
            memes = memes.len(),
            sort_mode = %self.config.sort_mode,
            "Refresh cycle complete"
        );

        RadarSnapshot {
            fetched_at: Utc::now(),
            sort_mode: self.config.sort_mode,
            buckets,
            top_picks,
            memes,
        }
    }
}
