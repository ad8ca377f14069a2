use defi_radar_core::{
    classify_risk, ranking_score, sort_key, RiskTier, ScannerConfig, YieldOpportunity,
};
use defi_radar_feeds::{PoolFeed, PoolRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Named yield bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LongTerm,
    ShortTerm,
    Focus,
    Layer2,
}

impl Category {
    /// All buckets, in the order they are flattened for top picks.
    pub const ALL: [Self; 4] = [Self::LongTerm, Self::ShortTerm, Self::Focus, Self::Layer2];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LongTerm => "long_term",
            Self::ShortTerm => "short_term",
            Self::Focus => "focus",
            Self::Layer2 => "layer2",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LongTerm => "Long-term",
            Self::ShortTerm => "Short-term",
            Self::Focus => "Focus Protocols",
            Self::Layer2 => "Layer 2",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "long_term" | "long" => Ok(Self::LongTerm),
            "short_term" | "short" => Ok(Self::ShortTerm),
            "focus" => Ok(Self::Focus),
            "layer2" | "l2" => Ok(Self::Layer2),
            other => Err(format!(
                "unknown category '{other}' (expected long_term, short_term, focus or layer2)"
            )),
        }
    }
}

/// The four ranked, size-bounded yield buckets of one classification run.
///
/// Buckets overlap: `long_term`, `short_term` and `focus` are mutually
/// exclusive, while `layer2` is an independent axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldBuckets {
    pub long_term: Vec<YieldOpportunity>,
    pub short_term: Vec<YieldOpportunity>,
    pub focus: Vec<YieldOpportunity>,
    pub layer2: Vec<YieldOpportunity>,
}

impl YieldBuckets {
    #[must_use]
    pub fn get(&self, category: Category) -> &[YieldOpportunity] {
        match category {
            Category::LongTerm => &self.long_term,
            Category::ShortTerm => &self.short_term,
            Category::Focus => &self.focus,
            Category::Layer2 => &self.layer2,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<YieldOpportunity> {
        match category {
            Category::LongTerm => &mut self.long_term,
            Category::ShortTerm => &mut self.short_term,
            Category::Focus => &mut self.focus,
            Category::Layer2 => &mut self.layer2,
        }
    }

    /// Iterates buckets in flattening order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[YieldOpportunity])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, entries)| entries.is_empty())
    }
}

/// Filters, scores and buckets raw yield pools.
pub struct YieldClassifier<'a> {
    config: &'a ScannerConfig,
}

impl<'a> YieldClassifier<'a> {
    #[must_use]
    pub const fn new(config: &'a ScannerConfig) -> Self {
        Self { config }
    }

    /// Turns a coerced pool into an opportunity, or `None` if it falls below
    /// the APY or TVL threshold.
    #[must_use]
    pub fn score_pool(&self, record: PoolRecord) -> Option<YieldOpportunity> {
        if record.apy < self.config.min_apy || record.tvl < self.config.min_tvl {
            return None;
        }

        let risk_tier = classify_risk(record.apy, record.tvl, &record.project, self.config);
        let opportunity_type = self.config.opportunity_type(&record.project).to_string();

        Some(YieldOpportunity {
            ranking_score: ranking_score(record.apy, risk_tier),
            risk_tier,
            opportunity_type,
            project: record.project,
            chain: record.chain,
            symbol: record.symbol,
            apy: record.apy,
            tvl: record.tvl,
            pool_id: record.pool_id,
        })
    }

    /// Categories an opportunity belongs to.
    #[must_use]
    pub fn categories(&self, entry: &YieldOpportunity) -> Vec<Category> {
        let mut categories = Vec::with_capacity(2);

        if self.config.is_focus(&entry.project) {
            categories.push(Category::Focus);
        } else if entry.risk_tier == RiskTier::Low {
            categories.push(Category::LongTerm);
        } else {
            categories.push(Category::ShortTerm);
        }

        if self.config.is_layer2(&entry.chain) {
            categories.push(Category::Layer2);
        }

        categories
    }

    /// Classifies a snapshot of raw pool records.
    ///
    /// Records that are malformed or below thresholds are skipped silently.
    /// Each bucket is sorted descending by the configured sort key (ties keep
    /// feed order) and truncated to the bucket limit.
    #[must_use]
    pub fn classify(&self, raw: &[Value]) -> YieldBuckets {
        let mut buckets = YieldBuckets::default();
        let mut retained = 0usize;

        for entry in raw
            .iter()
            .filter_map(PoolRecord::from_value)
            .filter_map(|record| self.score_pool(record))
        {
            retained += 1;
            for category in self.categories(&entry) {
                buckets.get_mut(category).push(entry.clone());
            }
        }

        let mode = self.config.sort_mode;
        for category in Category::ALL {
            let bucket = buckets.get_mut(category);
            bucket.sort_by(|a, b| sort_key(b, mode).cmp(&sort_key(a, mode)));
            bucket.truncate(self.config.bucket_limit);
        }

        info!(
            "Classified {} of {} pools (long_term={}, short_term={}, focus={}, layer2={})",
            retained,
            raw.len(),
            buckets.long_term.len(),
            buckets.short_term.len(),
            buckets.focus.len(),
            buckets.layer2.len()
        );

        buckets
    }

    /// Fetches pools from the feed and classifies them.
    ///
    /// A failed fetch is logged and yields empty buckets; it never propagates.
    pub async fn classify_from_feed<F: PoolFeed + ?Sized>(&self, feed: &F) -> YieldBuckets {
        match feed.fetch_pools().await {
            Ok(raw) => self.classify(&raw),
            Err(e) => {
                warn!(
                    kind = ?e.kind(),
                    error = %e,
                    "Yield feed unavailable, returning empty buckets"
                );
                YieldBuckets::default()
            }
        }
    }
}
