//! Classified records produced by a refresh cycle.

use crate::format::{format_percent, format_usd};
use crate::scoring::RiskTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A yield pool that passed the thresholds, with its derived risk and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldOpportunity {
    /// Protocol identifier (e.g. "aave-v3")
    pub project: String,
    /// Lowercased chain name
    pub chain: String,
    pub symbol: String,
    /// Annual percentage yield, in percent
    pub apy: Decimal,
    /// Total value locked, in USD
    pub tvl: Decimal,
    pub risk_tier: RiskTier,
    /// Upstream pool identifier, may be empty
    pub pool_id: String,
    /// `apy × risk multiplier`
    pub ranking_score: Decimal,
    pub opportunity_type: String,
}

impl YieldOpportunity {
    #[must_use]
    pub fn apy_display(&self) -> String {
        format_percent(self.apy)
    }

    #[must_use]
    pub fn tvl_display(&self) -> String {
        format_usd(self.tvl)
    }
}

/// A token market that passed the liquidity and volume filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeMarketEntry {
    pub symbol: String,
    /// Canonical chain name, or the raw chain id when unmapped
    pub chain: String,
    /// Price as reported upstream; "N/A" when absent
    pub price_usd: String,
    pub liquidity_usd: Decimal,
    pub volume_24h_usd: Decimal,
    /// 24h price change, in percent
    pub change_24h_pct: Decimal,
    pub risk_tier: RiskTier,
}

impl MemeMarketEntry {
    #[must_use]
    pub fn liquidity_display(&self) -> String {
        format_usd(self.liquidity_usd)
    }

    #[must_use]
    pub fn volume_display(&self) -> String {
        format_usd(self.volume_24h_usd)
    }

    #[must_use]
    pub fn change_display(&self) -> String {
        format_percent(self.change_24h_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yield_display_helpers() {
        let entry = YieldOpportunity {
            project: "lido".to_string(),
            chain: "eth".to_string(),
            symbol: "STETH".to_string(),
            apy: dec!(23.4),
            tvl: dec!(12345),
            risk_tier: RiskTier::Low,
            pool_id: String::new(),
            ranking_score: dec!(23.4),
            opportunity_type: "Staking / Restaking".to_string(),
        };

        assert_eq!(entry.apy_display(), "23.40%");
        assert_eq!(entry.tvl_display(), "$12,345");
    }

    #[test]
    fn test_meme_display_helpers() {
        let entry = MemeMarketEntry {
            symbol: "PEPE".to_string(),
            chain: "eth".to_string(),
            price_usd: "0.0000091".to_string(),
            liquidity_usd: dec!(2500000),
            volume_24h_usd: dec!(640000.4),
            change_24h_pct: dec!(-3.1),
            risk_tier: RiskTier::Medium,
        };

        assert_eq!(entry.liquidity_display(), "$2,500,000");
        assert_eq!(entry.volume_display(), "$640,000");
        assert_eq!(entry.change_display(), "-3.10%");
    }

    #[test]
    fn test_serializes_risk_tier_by_name() {
        let entry = MemeMarketEntry {
            symbol: "BONK".to_string(),
            chain: "sol".to_string(),
            price_usd: "N/A".to_string(),
            liquidity_usd: dec!(100000),
            volume_24h_usd: dec!(10000),
            change_24h_pct: dec!(0),
            risk_tier: RiskTier::High,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["risk_tier"], "High");
        assert_eq!(json["price_usd"], "N/A");
    }
}
