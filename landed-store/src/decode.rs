//! Tolerant decoding of loosely-typed stored values.
//!
//! Storage contents may come from older releases or may have been edited by
//! hand, so every field passes through one of these boundary functions with
//! an explicit per-field fallback before it is allowed anywhere near the
//! reducer. The reducer itself only ever sees well-formed values.

use landed_core::models::fees::MAX_CAR_PRICE_EUR;
use landed_core::models::{ContainerType, CostScenario, RatePair};
use serde_json::Value;

/// Coerces a stored value to a finite number, falling back to `default`.
///
/// Accepts JSON numbers and numeric strings; strings may carry space or
/// non-breaking-space thousands separators and a comma as the decimal mark.
pub fn num_or(
    value: Option<&Value>,
    default: f64,
) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_string(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

fn parse_numeric_string(s: &str) -> Option<f64> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse().ok()
}

pub fn bool_or(
    value: Option<&Value>,
    default: bool,
) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

/// Resolves to 40ft unless the stored value is exactly `"20ft"`.
pub fn container_or_default(value: Option<&Value>) -> ContainerType {
    match value {
        Some(Value::String(s)) if s == "20ft" => ContainerType::TwentyFoot,
        _ => ContainerType::FortyFoot,
    }
}

/// Resolves to company only on exact match, physical otherwise.
pub fn scenario_or_default(value: Option<&Value>) -> CostScenario {
    match value {
        Some(Value::String(s)) if s == "company" => CostScenario::Company,
        _ => CostScenario::Physical,
    }
}

/// Resolves the stored vehicle count into `[1, capacity]`.
pub fn car_count_or_default(
    value: Option<&Value>,
    container: ContainerType,
) -> usize {
    let parsed = num_or(value, 1.0);
    let count = if parsed >= 1.0 { parsed as usize } else { 1 };
    count.clamp(1, container.capacity())
}

/// Derives the price array from whatever is stored: an array of loose
/// numbers, a single loose number, or nothing. Entries are clamped into
/// `[0, MAX_CAR_PRICE_EUR]` and the array is truncated or zero-padded to
/// `count`.
pub fn car_prices_or_default(
    value: Option<&Value>,
    count: usize,
) -> Vec<f64> {
    let mut prices: Vec<f64> = match value {
        Some(Value::Array(items)) => items.iter().map(|item| num_or(Some(item), 0.0)).collect(),
        Some(single @ (Value::Number(_) | Value::String(_))) => vec![num_or(Some(single), 0.0)],
        _ => Vec::new(),
    };
    prices.resize(count, 0.0);
    for price in &mut prices {
        *price = price.clamp(0.0, MAX_CAR_PRICE_EUR);
    }
    prices
}

/// Derives the current rate pair from the legacy direct KRW→EUR and
/// USD→EUR rates. Accepted only when both legacy rates are finite and
/// positive.
pub fn derive_legacy_rates(
    krw_to_eur: f64,
    usd_to_eur: f64,
) -> Option<RatePair> {
    if !(krw_to_eur.is_finite() && krw_to_eur > 0.0 && usd_to_eur.is_finite() && usd_to_eur > 0.0)
    {
        return None;
    }
    let krw_per_eur = 1.0 / krw_to_eur;
    let usd_per_eur = 1.0 / usd_to_eur;
    Some(RatePair {
        krw_per_usd: krw_per_eur / usd_per_eur,
        usd_per_eur,
    })
}
