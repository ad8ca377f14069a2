pub mod config;
pub mod config_loader;
pub mod format;
pub mod opportunity;
pub mod scoring;

pub use config::{AppConfig, ConfigError, FeedConfig, ScannerConfig, SortMode};
pub use config_loader::ConfigLoader;
pub use format::{format_percent, format_usd, parse_percent, parse_usd};
pub use opportunity::{MemeMarketEntry, YieldOpportunity};
pub use scoring::{classify_market_risk, classify_risk, ranking_score, sort_key, RiskTier};
