//! Meme-market scanner.
//!
//! Queries the pair feed once per search term, keeps the deepest-volume
//! candidates of each term on tracked chains, and concatenates them in term
//! order. The final list is truncated by position, not re-sorted, so terms
//! queried last can be cut off entirely.

use defi_radar_core::{classify_market_risk, MemeMarketEntry, ScannerConfig};
use defi_radar_feeds::{PairFeed, PairRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Minimum 24h volume as a fraction of liquidity.
const MIN_VOLUME_TO_LIQUIDITY: Decimal = dec!(0.1);

/// A pair that passed the chain and liquidity filters.
struct Candidate {
    record: PairRecord,
    chain: String,
}

pub struct MemeScanner<'a> {
    config: &'a ScannerConfig,
}

impl<'a> MemeScanner<'a> {
    #[must_use]
    pub const fn new(config: &'a ScannerConfig) -> Self {
        Self { config }
    }

    /// Returns true if liquidity meets the minimum and 24h volume is at least
    /// a tenth of liquidity.
    #[must_use]
    pub fn is_liquid(&self, liquidity: Decimal, volume_24h: Decimal) -> bool {
        liquidity >= self.config.min_liquidity && volume_24h >= MIN_VOLUME_TO_LIQUIDITY * liquidity
    }

    fn candidate(&self, record: PairRecord) -> Option<Candidate> {
        let chain = record.chain_id.resolve(self.config);
        if !self.config.is_tracked_meme_chain(&chain) {
            return None;
        }
        if !self.is_liquid(record.liquidity_usd, record.volume_24h) {
            return None;
        }

        Some(Candidate { record, chain })
    }

    /// Selects one search term's contribution: filtered, sorted by 24h volume
    /// (descending, ties keep feed order) and capped at the per-term limit.
    #[must_use]
    pub fn rank_term(&self, raw: &[Value]) -> Vec<MemeMarketEntry> {
        let mut candidates: Vec<Candidate> = raw
            .iter()
            .filter_map(PairRecord::from_value)
            .filter_map(|record| self.candidate(record))
            .collect();

        candidates.sort_by(|a, b| b.record.volume_24h.cmp(&a.record.volume_24h));
        candidates.truncate(self.config.meme_per_term_limit);

        candidates
            .into_iter()
            .map(|Candidate { record, chain }| MemeMarketEntry {
                risk_tier: classify_market_risk(record.change_24h, record.liquidity_usd),
                symbol: record.base_symbol,
                chain,
                price_usd: record.price_usd,
                liquidity_usd: record.liquidity_usd,
                volume_24h_usd: record.volume_24h,
                change_24h_pct: record.change_24h,
            })
            .collect()
    }

    /// Concatenates per-term results in order and truncates to the list limit.
    #[must_use]
    pub fn assemble<I>(&self, per_term: I) -> Vec<MemeMarketEntry>
    where
        I: IntoIterator<Item = Vec<MemeMarketEntry>>,
    {
        let mut results: Vec<MemeMarketEntry> = per_term.into_iter().flatten().collect();
        results.truncate(self.config.meme_limit);
        results
    }

    /// Scans raw pair snapshots, one slice per search term, in term order.
    #[must_use]
    pub fn scan(&self, raw_by_term: &[Vec<Value>]) -> Vec<MemeMarketEntry> {
        self.assemble(raw_by_term.iter().map(|raw| self.rank_term(raw)))
    }

    /// Queries every configured search term concurrently and scans the results.
    ///
    /// A failing term is logged and contributes nothing; the other terms are
    /// unaffected. Results are joined in term order regardless of which
    /// request finishes first.
    pub async fn scan_feed<F: PairFeed + ?Sized>(&self, feed: &F) -> Vec<MemeMarketEntry> {
        let futures: Vec<_> = self
            .config
            .meme_queries
            .iter()
            .map(|term| async move {
                match feed.search_pairs(term).await {
                    Ok(raw) => {
                        let ranked = self.rank_term(&raw);
                        debug!(
                            term = %term,
                            pairs = raw.len(),
                            kept = ranked.len(),
                            "Scanned search term"
                        );
                        Some(ranked)
                    }
                    Err(e) => {
                        warn!(
                            term = %term,
                            kind = ?e.kind(),
                            error = %e,
                            "Pair search failed, skipping term"
                        );
                        None
                    }
                }
            })
            .collect();

        let per_term = futures_util::future::join_all(futures).await;
        let results = self.assemble(per_term.into_iter().flatten());

        info!(
            "Meme scan complete: {} markets from {} search terms",
            results.len(),
            self.config.meme_queries.len()
        );

        results
    }
}
