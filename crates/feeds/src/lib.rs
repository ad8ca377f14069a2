//! Upstream feeds for the DeFi radar.
//!
//! This crate provides:
//! - Rate-limited REST clients for the DefiLlama yields API and the
//!   DexScreener pair-search API
//! - `PoolFeed` / `PairFeed` traits so callers can swap in other sources
//! - Per-record coercion of loosely typed feed payloads
//!
//! # Example
//!
//! ```no_run
//! use defi_radar_core::FeedConfig;
//! use defi_radar_feeds::YieldsClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YieldsClient::new(&FeedConfig::default())?;
//!     let pools = client.get_pools().await?;
//!     println!("Fetched {} raw pools", pools.len());
//!     Ok(())
//! }
//! ```

pub mod dexscreener;
pub mod error;
mod http;
pub mod llama;
pub mod models;
pub mod traits;

pub use dexscreener::DexScreenerClient;
pub use error::{FeedError, FeedErrorKind};
pub use llama::YieldsClient;
pub use models::{ChainId, PairRecord, PoolRecord};
pub use traits::{PairFeed, PoolFeed};
