//! Feed response envelopes and per-record coercion.
//!
//! Upstream records are loosely typed, so each one is kept as raw JSON and
//! coerced individually. A record that cannot be coerced yields `None` and is
//! dropped by the caller without affecting its neighbours.

use defi_radar_core::ScannerConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// Envelope of the pools endpoint: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct PoolsResponse {
    #[serde(default)]
    pub data: Value,
}

impl PoolsResponse {
    /// Returns the raw pool records; a missing or non-array `data` yields none.
    #[must_use]
    pub fn into_records(self) -> Vec<Value> {
        match self.data {
            Value::Array(records) => records,
            _ => Vec::new(),
        }
    }
}

/// Envelope of the pair-search endpoint: `{ "pairs": [...] }`.
#[derive(Debug, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Value,
}

impl PairsResponse {
    #[must_use]
    pub fn into_records(self) -> Vec<Value> {
        match self.pairs {
            Value::Array(records) => records,
            _ => Vec::new(),
        }
    }
}

/// Converts a JSON number to a decimal, accepting exponent notation.
#[must_use]
pub fn decimal_from_number(number: &Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Strict numeric field: present and a JSON number.
fn strict_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => decimal_from_number(n),
        _ => None,
    }
}

/// Lenient numeric field: numbers and numeric strings parse, anything else is zero.
fn lenient_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => decimal_from_number(n).unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Reads `obj[outer][inner]` leniently.
fn nested_decimal(obj: &Map<String, Value>, outer: &str, inner: &str) -> Decimal {
    lenient_decimal(obj.get(outer).and_then(Value::as_object).and_then(|o| o.get(inner)))
}

/// Text field with a fallback for missing, null, empty or non-scalar values.
fn text_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}

/// A pool record after coercion, before thresholds are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRecord {
    pub project: String,
    /// Lowercased; "n/a" when absent
    pub chain: String,
    pub symbol: String,
    pub pool_id: String,
    pub apy: Decimal,
    pub tvl: Decimal,
}

impl PoolRecord {
    /// Coerces a raw pool. Returns `None` if the record is not an object or if
    /// `apy` / `tvlUsd` is missing or not numeric.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let apy = strict_decimal(obj.get("apy"))?;
        let tvl = strict_decimal(obj.get("tvlUsd"))?;

        Some(Self {
            project: text_or(obj.get("project"), ""),
            chain: text_or(obj.get("chain"), "N/A").to_lowercase(),
            symbol: text_or(obj.get("symbol"), "N/A"),
            pool_id: text_or(obj.get("pool"), ""),
            apy,
            tvl,
        })
    }
}

/// Chain identifier as reported by the pair feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainId {
    Numeric(u64),
    Named(String),
}

impl ChainId {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(id) => Self::Numeric(id),
                None => Self::Named(n.to_string()),
            },
            Some(Value::String(s)) => Self::Named(s.clone()),
            _ => Self::Numeric(0),
        }
    }

    /// Canonical lowercase chain name. Unmapped numeric ids resolve to the id
    /// itself, e.g. `"999999"`.
    #[must_use]
    pub fn resolve(&self, config: &ScannerConfig) -> String {
        match self {
            Self::Numeric(id) => config.chain_name(*id).to_lowercase(),
            Self::Named(name) => name.to_lowercase(),
        }
    }
}

/// A market pair after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub chain_id: ChainId,
    pub base_symbol: String,
    /// Passed through as text; "N/A" when absent
    pub price_usd: String,
    pub liquidity_usd: Decimal,
    pub volume_24h: Decimal,
    pub change_24h: Decimal,
}

impl PairRecord {
    /// Coerces a raw pair. Only non-object records are rejected; missing
    /// numeric fields read as zero.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let base_symbol = obj
            .get("baseToken")
            .and_then(Value::as_object)
            .map_or_else(|| "?".to_string(), |token| text_or(token.get("symbol"), "?"));

        Some(Self {
            chain_id: ChainId::from_value(obj.get("chainId")),
            base_symbol,
            price_usd: text_or(obj.get("priceUsd"), "N/A"),
            liquidity_usd: nested_decimal(obj, "liquidity", "usd"),
            volume_24h: nested_decimal(obj, "volume", "h24"),
            change_24h: nested_decimal(obj, "priceChange", "h24"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_pool_record_coercion() {
        let raw = json!({
            "apy": 20,
            "tvlUsd": 60000000.5,
            "project": "beefy",
            "chain": "Arbitrum",
            "symbol": "USDC-USDT",
            "pool": "p1"
        });

        let record = PoolRecord::from_value(&raw).unwrap();
        assert_eq!(record.apy, dec!(20));
        assert_eq!(record.tvl, dec!(60000000.5));
        assert_eq!(record.chain, "arbitrum");
        assert_eq!(record.pool_id, "p1");
    }

    #[test]
    fn test_pool_record_defaults() {
        let raw = json!({ "apy": 7.25, "tvlUsd": 900000, "chain": null, "symbol": "" });

        let record = PoolRecord::from_value(&raw).unwrap();
        assert_eq!(record.project, "");
        assert_eq!(record.chain, "n/a");
        assert_eq!(record.symbol, "N/A");
        assert_eq!(record.pool_id, "");
    }

    #[test]
    fn test_pool_record_rejects_non_numeric() {
        assert!(PoolRecord::from_value(&json!({ "apy": "12.5", "tvlUsd": 1000000 })).is_none());
        assert!(PoolRecord::from_value(&json!({ "apy": null, "tvlUsd": 1000000 })).is_none());
        assert!(PoolRecord::from_value(&json!({ "apy": 12.5 })).is_none());
        assert!(PoolRecord::from_value(&json!({ "apy": true, "tvlUsd": 1000000 })).is_none());
        assert!(PoolRecord::from_value(&json!(["apy", 12.5])).is_none());
    }

    #[test]
    fn test_decimal_from_number_exponent() {
        let n: Number = serde_json::from_str("1.5e7").unwrap();
        assert_eq!(decimal_from_number(&n), Some(dec!(15000000)));
    }

    #[test]
    fn test_pair_record_coercion() {
        let raw = json!({
            "chainId": 56,
            "liquidity": { "usd": 250000.0 },
            "volume": { "h24": "90000" },
            "priceChange": { "h24": -12.5 },
            "baseToken": { "symbol": "FLOKI" },
            "priceUsd": "0.00018"
        });

        let record = PairRecord::from_value(&raw).unwrap();
        assert_eq!(record.chain_id, ChainId::Numeric(56));
        assert_eq!(record.base_symbol, "FLOKI");
        assert_eq!(record.price_usd, "0.00018");
        assert_eq!(record.liquidity_usd, dec!(250000));
        assert_eq!(record.volume_24h, dec!(90000));
        assert_eq!(record.change_24h, dec!(-12.5));
    }

    #[test]
    fn test_pair_record_missing_fields_read_as_zero() {
        let record = PairRecord::from_value(&json!({ "liquidity": null })).unwrap();
        assert_eq!(record.chain_id, ChainId::Numeric(0));
        assert_eq!(record.base_symbol, "?");
        assert_eq!(record.price_usd, "N/A");
        assert_eq!(record.liquidity_usd, Decimal::ZERO);
        assert_eq!(record.volume_24h, Decimal::ZERO);
    }

    #[test]
    fn test_chain_id_resolution() {
        let config = ScannerConfig::default();
        assert_eq!(ChainId::Numeric(8453).resolve(&config), "base");
        assert_eq!(ChainId::Numeric(999999).resolve(&config), "999999");
        assert_eq!(ChainId::Named("BSC".to_string()).resolve(&config), "bsc");
    }

    #[test]
    fn test_envelopes_tolerate_non_array_payloads() {
        let pools: PoolsResponse = serde_json::from_value(json!({ "data": "oops" })).unwrap();
        assert!(pools.into_records().is_empty());

        let pairs: PairsResponse =
            serde_json::from_value(json!({ "schemaVersion": "1.0.0" })).unwrap();
        assert!(pairs.into_records().is_empty());
    }
}
