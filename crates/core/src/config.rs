use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("unknown sort mode '{0}' (expected one of: apy, apr, tvl, ror)")]
    UnknownSortMode(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub feeds: FeedConfig,
}

/// Field used to order entries inside each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Apy,
    /// Alias of `Apy`; both sort by the yield figure.
    Apr,
    Tvl,
    /// Risk-weighted yield (the ranking score).
    #[default]
    Ror,
}

impl SortMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apy => "apy",
            Self::Apr => "apr",
            Self::Tvl => "tvl",
            Self::Ror => "ror",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apy" => Ok(Self::Apy),
            "apr" => Ok(Self::Apr),
            "tvl" => Ok(Self::Tvl),
            "ror" => Ok(Self::Ror),
            _ => Err(ConfigError::UnknownSortMode(s.to_string())),
        }
    }
}

/// Thresholds, lookup tables and limits for one classification run.
///
/// Built once at startup and shared by reference; nothing mutates it while a
/// refresh cycle is in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Minimum APY (percent) for a pool to be retained
    pub min_apy: Decimal,
    /// Minimum TVL (USD) for a pool to be retained
    pub min_tvl: Decimal,
    /// Minimum pair liquidity (USD) for a meme market to be retained
    pub min_liquidity: Decimal,
    pub sort_mode: SortMode,
    /// Maximum entries per yield bucket
    pub bucket_limit: usize,
    pub top_picks_limit: usize,
    /// Maximum candidates kept from a single search term
    pub meme_per_term_limit: usize,
    /// Maximum entries in the final meme list
    pub meme_limit: usize,
    /// Curated protocols that are always treated as low risk
    pub focus_protocols: BTreeSet<String>,
    pub layer2_chains: BTreeSet<String>,
    /// Chains the meme scanner keeps
    pub meme_chains: BTreeSet<String>,
    /// Numeric chain id (as a string key) to canonical chain name
    pub chain_ids: BTreeMap<String, String>,
    /// Project id to opportunity type label
    pub opportunity_types: BTreeMap<String, String>,
    /// Search terms queried against the pair feed, in order
    pub meme_queries: Vec<String>,
}

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn string_map(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl Default for ScannerConfig {
    fn default() -> Self {
        const VAULT: &str = "Vault / Auto-compounding";
        const STAKING: &str = "Staking / Restaking";
        const FARMING: &str = "Yield Farming";
        const LENDING: &str = "Lending / Borrowing";

        Self {
            min_apy: dec!(5.0),
            min_tvl: dec!(500000),
            min_liquidity: dec!(100000),
            sort_mode: SortMode::Ror,
            bucket_limit: 10,
            top_picks_limit: 5,
            meme_per_term_limit: 3,
            meme_limit: 12,
            focus_protocols: string_set(&[
                "beefy",
                "yearn",
                "radiant",
                "aave",
                "aave-v3",
                "venus",
                "morpho",
                "pancakeswap",
                "raydium",
                "lido",
                "marinade",
                "eigenlayer",
                "kamino",
                "krystal",
                "turbo",
            ]),
            layer2_chains: string_set(&[
                "arbitrum", "optimism", "zksync", "base", "scroll", "linea",
            ]),
            meme_chains: string_set(&[
                "sui", "tao", "eth", "bsc", "sol", "base", "optimism", "arbitrum",
            ]),
            chain_ids: string_map(&[
                ("1", "eth"),
                ("56", "bsc"),
                ("101", "sol"),
                ("1001", "sui"),
                ("108", "tao"),
                ("42161", "arbitrum"),
                ("10", "optimism"),
                ("8453", "base"),
            ]),
            opportunity_types: string_map(&[
                ("beefy", VAULT),
                ("yearn", VAULT),
                ("kamino", VAULT),
                ("krystal", VAULT),
                ("lido", STAKING),
                ("marinade", STAKING),
                ("eigenlayer", STAKING),
                ("turbo", FARMING),
                ("raydium", FARMING),
                ("pancakeswap", FARMING),
                ("aave", LENDING),
                ("aave-v3", LENDING),
                ("venus", LENDING),
                ("morpho", LENDING),
                ("radiant", LENDING),
            ]),
            meme_queries: ["pepe", "doge", "shiba", "floki", "bonk"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl ScannerConfig {
    /// Returns true if the project is a curated focus protocol (case-insensitive).
    #[must_use]
    pub fn is_focus(&self, project: &str) -> bool {
        self.focus_protocols.contains(&project.to_lowercase())
    }

    /// Returns true if the (already lowercased) chain is a layer-2 chain.
    #[must_use]
    pub fn is_layer2(&self, chain: &str) -> bool {
        self.layer2_chains.contains(chain)
    }

    #[must_use]
    pub fn is_tracked_meme_chain(&self, chain: &str) -> bool {
        self.meme_chains.contains(chain)
    }

    /// Resolves a numeric chain id, falling back to the id itself.
    #[must_use]
    pub fn chain_name(&self, chain_id: u64) -> String {
        let key = chain_id.to_string();
        self.chain_ids.get(&key).cloned().unwrap_or(key)
    }

    /// Looks up the opportunity type for a project, "Unknown" if absent.
    #[must_use]
    pub fn opportunity_type(&self, project: &str) -> &str {
        self.opportunity_types
            .get(&project.to_lowercase())
            .map_or("Unknown", String::as_str)
    }

    /// Lowercases the protocol and chain tables so lookups match regardless
    /// of how entries were written in the config file.
    pub fn normalize(&mut self) {
        fn lowercase_set(set: &mut BTreeSet<String>) {
            *set = set.iter().map(|s| s.to_lowercase()).collect();
        }

        lowercase_set(&mut self.focus_protocols);
        lowercase_set(&mut self.layer2_chains);
        lowercase_set(&mut self.meme_chains);

        self.opportunity_types = std::mem::take(&mut self.opportunity_types)
            .into_iter()
            .map(|(project, kind)| (project.to_lowercase(), kind))
            .collect();
        for chain in self.chain_ids.values_mut() {
            *chain = chain.to_lowercase();
        }
    }

    /// Checks thresholds and limits for values that would make every run empty
    /// or meaningless.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("min_apy", self.min_apy),
            ("min_tvl", self.min_tvl),
            ("min_liquidity", self.min_liquidity),
        ];
        for (name, value) in thresholds {
            if value.is_sign_negative() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let limits = [
            ("bucket_limit", self.bucket_limit),
            ("top_picks_limit", self.top_picks_limit),
            ("meme_per_term_limit", self.meme_per_term_limit),
            ("meme_limit", self.meme_limit),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }

        Ok(())
    }
}

/// Endpoints and transport settings for the upstream feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub yields_base_url: String,
    pub dexscreener_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Client-side rate limit per feed
    pub requests_per_minute: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            yields_base_url: "https://yields.llama.fi".to_string(),
            dexscreener_base_url: "https://api.dexscreener.com".to_string(),
            timeout_secs: 15,
            requests_per_minute: 60,
        }
    }
}
