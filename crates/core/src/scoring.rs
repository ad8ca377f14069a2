//! Risk tiers and ranking scores.
//!
//! Pure functions over numeric inputs; every classifier and scanner decision
//! about risk goes through here.

use crate::config::{ScannerConfig, SortMode};
use crate::opportunity::YieldOpportunity;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Weight applied to APY when computing the ranking score.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Low => dec!(1.0),
            Self::Medium => dec!(0.6),
            Self::High => dec!(0.3),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row of the risk decision table.
struct RiskBand {
    tier: RiskTier,
    matches: fn(apy: Decimal, tvl: Decimal) -> bool,
}

fn deep_and_modest(apy: Decimal, tvl: Decimal) -> bool {
    tvl > dec!(50000000) && apy < dec!(15)
}

fn mid_tvl_mid_yield(apy: Decimal, tvl: Decimal) -> bool {
    (dec!(5000000)..=dec!(50000000)).contains(&tvl) && (dec!(15)..=dec!(50)).contains(&apy)
}

fn shallow_or_extreme(apy: Decimal, tvl: Decimal) -> bool {
    tvl < dec!(5000000) || apy > dec!(50)
}

/// Evaluated top to bottom; the first matching band wins. The bands overlap
/// and leave gaps, so the order is significant.
const RISK_BANDS: [RiskBand; 3] = [
    RiskBand {
        tier: RiskTier::Low,
        matches: deep_and_modest,
    },
    RiskBand {
        tier: RiskTier::Medium,
        matches: mid_tvl_mid_yield,
    },
    RiskBand {
        tier: RiskTier::High,
        matches: shallow_or_extreme,
    },
];

/// Tier for values that fall between the bands.
const FALLBACK_TIER: RiskTier = RiskTier::Medium;

/// Classifies a pool's risk tier.
///
/// Focus protocols are always `Low`, regardless of the numeric signals.
#[must_use]
pub fn classify_risk(
    apy: Decimal,
    tvl: Decimal,
    project: &str,
    config: &ScannerConfig,
) -> RiskTier {
    if config.is_focus(project) {
        return RiskTier::Low;
    }

    RISK_BANDS
        .iter()
        .find(|band| (band.matches)(apy, tvl))
        .map_or(FALLBACK_TIER, |band| band.tier)
}

/// Risk-weighted yield: `apy × multiplier(tier)`.
#[must_use]
pub fn ranking_score(apy: Decimal, tier: RiskTier) -> Decimal {
    apy * tier.multiplier()
}

/// Liquidity above which a rising market counts as low risk.
const MARKET_LOW_RISK_LIQUIDITY: Decimal = dec!(1000000);

/// 24h change (percent) below which a market counts as high risk.
const MARKET_HIGH_RISK_CHANGE: Decimal = dec!(-30);

/// Classifies a token market from its 24h price change and liquidity.
#[must_use]
pub fn classify_market_risk(change_24h: Decimal, liquidity: Decimal) -> RiskTier {
    if change_24h > Decimal::ZERO && liquidity > MARKET_LOW_RISK_LIQUIDITY {
        RiskTier::Low
    } else if change_24h < MARKET_HIGH_RISK_CHANGE {
        RiskTier::High
    } else {
        RiskTier::Medium
    }
}

/// Value an entry is ordered by under the given sort mode.
#[must_use]
pub fn sort_key(entry: &YieldOpportunity, mode: SortMode) -> Decimal {
    match mode {
        SortMode::Apy | SortMode::Apr => entry.apy,
        SortMode::Tvl => entry.tvl,
        SortMode::Ror => entry.ranking_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScannerConfig {
        ScannerConfig::default()
    }

    #[test]
    fn test_focus_protocol_overrides_numbers() {
        // Tiny TVL and extreme APY would be High for anyone else
        assert_eq!(classify_risk(dec!(400), dec!(600000), "Beefy", &config()), RiskTier::Low);
        assert_eq!(classify_risk(dec!(400), dec!(600000), "curve", &config()), RiskTier::High);
    }

    #[test]
    fn test_low_band() {
        assert_eq!(classify_risk(dec!(8), dec!(60000000), "curve", &config()), RiskTier::Low);
        // APY of exactly 15 leaves the low band
        assert_ne!(classify_risk(dec!(15), dec!(60000000), "curve", &config()), RiskTier::Low);
    }

    #[test]
    fn test_medium_band_boundaries_are_inclusive() {
        let c = config();
        assert_eq!(classify_risk(dec!(15), dec!(5000000), "curve", &c), RiskTier::Medium);
        assert_eq!(classify_risk(dec!(50), dec!(50000000), "curve", &c), RiskTier::Medium);
    }

    #[test]
    fn test_high_band() {
        let c = config();
        assert_eq!(classify_risk(dec!(10), dec!(4999999), "curve", &c), RiskTier::High);
        assert_eq!(classify_risk(dec!(50.01), dec!(20000000), "curve", &c), RiskTier::High);
        assert_eq!(classify_risk(dec!(80), dec!(90000000), "curve", &c), RiskTier::High);
    }

    #[test]
    fn test_gap_falls_back_to_medium() {
        let c = config();
        // Mid TVL with APY under 15 matches no band
        assert_eq!(classify_risk(dec!(10), dec!(20000000), "curve", &c), RiskTier::Medium);
        // Deep TVL with APY between 15 and 50 matches no band
        assert_eq!(classify_risk(dec!(30), dec!(80000000), "curve", &c), RiskTier::Medium);
    }

    #[test]
    fn test_ranking_score_multipliers() {
        assert_eq!(ranking_score(dec!(20), RiskTier::Low), dec!(20));
        assert_eq!(ranking_score(dec!(20), RiskTier::Medium), dec!(12));
        assert_eq!(ranking_score(dec!(20), RiskTier::High), dec!(6));
        assert_eq!(ranking_score(dec!(12.34), RiskTier::High), dec!(3.702));
    }

    #[test]
    fn test_market_risk() {
        assert_eq!(classify_market_risk(dec!(4.2), dec!(2000000)), RiskTier::Low);
        // Rising but shallow
        assert_eq!(classify_market_risk(dec!(4.2), dec!(1000000)), RiskTier::Medium);
        assert_eq!(classify_market_risk(dec!(0), dec!(5000000)), RiskTier::Medium);
        assert_eq!(classify_market_risk(dec!(-30), dec!(500000)), RiskTier::Medium);
        assert_eq!(classify_market_risk(dec!(-30.01), dec!(500000)), RiskTier::High);
    }

    #[test]
    fn test_sort_key_selects_field() {
        let entry = YieldOpportunity {
            project: "curve".to_string(),
            chain: "eth".to_string(),
            symbol: "3CRV".to_string(),
            apy: dec!(12),
            tvl: dec!(9000000),
            risk_tier: RiskTier::Medium,
            pool_id: "p".to_string(),
            ranking_score: dec!(7.2),
            opportunity_type: "Unknown".to_string(),
        };

        assert_eq!(sort_key(&entry, SortMode::Apy), dec!(12));
        assert_eq!(sort_key(&entry, SortMode::Apr), dec!(12));
        assert_eq!(sort_key(&entry, SortMode::Tvl), dec!(9000000));
        assert_eq!(sort_key(&entry, SortMode::Ror), dec!(7.2));
    }

    #[test]
    fn test_risk_tier_display() {
        assert_eq!(RiskTier::Low.to_string(), "Low");
        assert_eq!(RiskTier::High.as_str(), "High");
    }
}
