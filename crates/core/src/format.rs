//! Display formatting for USD amounts and percentages.
//!
//! Records keep decimals as the source of truth; these helpers derive the
//! strings shown to users and parse them back.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Formats a USD amount with no fractional digits and thousands separators,
/// e.g. `$12,345`. Rounds half to even.
#[must_use]
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a percentage with two decimals and a trailing `%`, e.g. `23.40%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// Parses a string produced by [`format_usd`] (or a bare number) back into a
/// decimal. Returns `None` for anything that is not a number.
#[must_use]
pub fn parse_usd(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = rest.chars().filter(|c| *c != '$' && *c != ',').collect();
    let value = Decimal::from_str(cleaned.trim()).ok()?;

    Some(if negative { -value } else { value })
}

/// Parses a string produced by [`format_percent`] back into a decimal.
#[must_use]
pub fn parse_percent(text: &str) -> Option<Decimal> {
    let cleaned = text.trim().trim_end_matches('%').trim();
    Decimal::from_str(cleaned).ok()
}
