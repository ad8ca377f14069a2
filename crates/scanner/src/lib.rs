//! Opportunity classification and ranking.
//!
//! - [`YieldClassifier`] filters raw pools, scores them and splits them into
//!   the `long_term`, `short_term`, `focus` and `layer2` buckets
//! - [`MemeScanner`] selects liquid, high-volume token markets per search term
//! - [`top_picks`] ranks across all buckets
//! - [`Radar`] runs one refresh cycle against both feeds concurrently
//!
//! # Example
//!
//! ```no_run
//! use defi_radar_core::ConfigLoader;
//! use defi_radar_scanner::Radar;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let radar = Radar::from_config(&config)?;
//!
//!     let snapshot = radar.refresh().await;
//!     println!("{} top picks", snapshot.top_picks.len());
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod classifier;
pub mod meme;
pub mod refresh;

pub use aggregator::{top_picks, PicksSummary};
pub use classifier::{Category, YieldBuckets, YieldClassifier};
pub use meme::MemeScanner;
pub use refresh::{Radar, RadarSnapshot};
