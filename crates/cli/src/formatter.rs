#![allow(clippy::format_push_string)]

use defi_radar_core::{format_percent, format_usd, MemeMarketEntry, YieldOpportunity};
use defi_radar_scanner::{Category, PicksSummary, RadarSnapshot, YieldBuckets};

const RULE: &str = "───────────────────────────────────────────────────────────────────────────────\n";
const BANNER: &str = "═══════════════════════════════════════════════════════════════════════════════\n";
const NO_DATA: &str = "No data available.\n";

pub struct SnapshotFormatter;

impl SnapshotFormatter {
    #[must_use]
    pub fn format(snapshot: &RadarSnapshot) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("                           DEFI OPPORTUNITY RADAR\n");
        output.push_str(BANNER);
        output.push_str(&format!(
            "Fetched: {}   Sort mode: {}\n\n",
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
            snapshot.sort_mode
        ));

        output.push_str(&Self::format_top_picks(&snapshot.top_picks));
        output.push_str(&Self::format_buckets(&snapshot.buckets));
        output.push_str(&Self::format_memes(&snapshot.memes));

        output
    }

    #[must_use]
    pub fn format_top_picks(picks: &[YieldOpportunity]) -> String {
        let mut output = Self::section("Top Picks (highest risk-weighted yield)");

        if picks.is_empty() {
            output.push_str(NO_DATA);
            output.push('\n');
            return output;
        }

        // Totals can exceed the decimal range; the table is still shown
        if let Some(summary) = PicksSummary::from_picks(picks) {
            output.push_str(&format!(
                "Average APY: {}   Total TVL: {}   Average RoR: {:.2}\n\n",
                format_percent(summary.average_apy),
                format_usd(summary.total_tvl),
                summary.average_ranking_score
            ));
        }
        output.push_str(&Self::yield_table(picks));

        output.push('\n');
        output
    }

    #[must_use]
    pub fn format_buckets(buckets: &YieldBuckets) -> String {
        let mut output = String::new();
        for (category, entries) in buckets.iter() {
            output.push_str(&Self::format_bucket(category, entries));
        }
        output
    }

    #[must_use]
    pub fn format_bucket(category: Category, entries: &[YieldOpportunity]) -> String {
        let mut output = Self::section(category.label());
        if entries.is_empty() {
            output.push_str(NO_DATA);
        } else {
            output.push_str(&Self::yield_table(entries));
        }
        output.push('\n');
        output
    }

    #[must_use]
    pub fn format_memes(memes: &[MemeMarketEntry]) -> String {
        let mut output = Self::section("Meme Coins");

        if memes.is_empty() {
            output.push_str(NO_DATA);
            output.push('\n');
            return output;
        }

        output.push_str(&format!(
            "{:<12} {:<10} {:>14} {:>14} {:>14} {:>10} {:<6}\n",
            "Symbol", "Chain", "Price", "Liquidity", "24h Volume", "24h Chg", "Risk"
        ));
        for meme in memes {
            output.push_str(&format!(
                "{:<12} {:<10} {:>14} {:>14} {:>14} {:>10} {:<6}\n",
                meme.symbol,
                meme.chain.to_uppercase(),
                meme.price_usd,
                meme.liquidity_display(),
                meme.volume_display(),
                meme.change_display(),
                meme.risk_tier
            ));
        }

        output.push('\n');
        output
    }

    fn section(title: &str) -> String {
        format!("{title}\n{RULE}")
    }

    fn yield_table(entries: &[YieldOpportunity]) -> String {
        let mut output = format!(
            "{:<18} {:<10} {:<18} {:>9} {:>16} {:<6} {:>8}  {}\n",
            "Project", "Chain", "Symbol", "APY", "TVL", "Risk", "RoR", "Type"
        );

        for entry in entries {
            output.push_str(&format!(
                "{:<18} {:<10} {:<18} {:>9} {:>16} {:<6} {:>8.2}  {}\n",
                entry.project,
                entry.chain,
                entry.symbol,
                entry.apy_display(),
                entry.tvl_display(),
                entry.risk_tier,
                entry.ranking_score,
                entry.opportunity_type
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defi_radar_core::{RiskTier, SortMode};
    use rust_decimal_macros::dec;

    fn sample_entry() -> YieldOpportunity {
        YieldOpportunity {
            project: "aave-v3".to_string(),
            chain: "arbitrum".to_string(),
            symbol: "USDC".to_string(),
            apy: dec!(7.5),
            tvl: dec!(1234567),
            risk_tier: RiskTier::Low,
            pool_id: "p1".to_string(),
            ranking_score: dec!(7.5),
            opportunity_type: "Lending / Borrowing".to_string(),
        }
    }

    #[test]
    fn test_empty_bucket_renders_no_data() {
        let output = SnapshotFormatter::format_bucket(Category::Layer2, &[]);
        assert!(output.starts_with("Layer 2\n"));
        assert!(output.contains("No data available."));
    }

    #[test]
    fn test_bucket_rows_use_display_strings() {
        let output = SnapshotFormatter::format_bucket(Category::Focus, &[sample_entry()]);
        assert!(output.contains("aave-v3"));
        assert!(output.contains("7.50%"));
        assert!(output.contains("$1,234,567"));
        assert!(output.contains("Lending / Borrowing"));
    }

    #[test]
    fn test_top_picks_summary_line() {
        let output = SnapshotFormatter::format_top_picks(&[sample_entry()]);
        assert!(output.contains("Average APY: 7.50%"));
        assert!(output.contains("Total TVL: $1,234,567"));
    }

    #[test]
    fn test_top_picks_without_summary_when_totals_overflow() {
        let huge = YieldOpportunity {
            tvl: dec!(60000000000000000000000000000),
            ..sample_entry()
        };

        let output = SnapshotFormatter::format_top_picks(&[huge.clone(), huge]);
        assert!(!output.contains("Average APY"));
        assert!(!output.contains("No data available."));
        assert_eq!(output.matches("aave-v3").count(), 2);
    }

    #[test]
    fn test_full_snapshot_with_no_data() {
        let snapshot = RadarSnapshot {
            fetched_at: chrono::Utc::now(),
            sort_mode: SortMode::Ror,
            buckets: YieldBuckets::default(),
            top_picks: vec![],
            memes: vec![],
        };

        let output = SnapshotFormatter::format(&snapshot);
        assert!(output.contains("Sort mode: ror"));
        // Top picks, four buckets and memes
        assert_eq!(output.matches("No data available.").count(), 6);
    }

    #[test]
    fn test_meme_rows() {
        let meme = MemeMarketEntry {
            symbol: "BONK".to_string(),
            chain: "sol".to_string(),
            price_usd: "N/A".to_string(),
            liquidity_usd: dec!(800000),
            volume_24h_usd: dec!(300000),
            change_24h_pct: dec!(-41.7),
            risk_tier: RiskTier::High,
        };

        let output = SnapshotFormatter::format_memes(&[meme]);
        assert!(output.contains("SOL"));
        assert!(output.contains("$800,000"));
        assert!(output.contains("-41.70%"));
        assert!(output.contains("High"));
    }
}
