use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Fallback KRW/USD rate used when no valid rate is available.
pub const DEFAULT_KRW_PER_USD: f64 = 1350.0;

/// Fallback USD/EUR rate used when no valid rate is available.
pub const DEFAULT_USD_PER_EUR: f64 = 1.08;

/// Plausible band for the KRW/USD rate. Anything outside is treated as a
/// bad quote by every consumer.
pub const KRW_PER_USD_RANGE: RangeInclusive<f64> = 500.0..=2500.0;

/// Plausible band for the USD/EUR rate ("USD needed to buy 1 EUR").
pub const USD_PER_EUR_RANGE: RangeInclusive<f64> = 0.5..=2.0;

pub fn is_valid_krw_per_usd(rate: f64) -> bool {
    rate.is_finite() && KRW_PER_USD_RANGE.contains(&rate)
}

pub fn is_valid_usd_per_eur(rate: f64) -> bool {
    rate.is_finite() && USD_PER_EUR_RANGE.contains(&rate)
}

/// A KRW/USD + USD/EUR quote pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePair {
    #[serde(rename = "krwPerUsd")]
    pub krw_per_usd: f64,
    #[serde(rename = "usdPerEur")]
    pub usd_per_eur: f64,
}

impl RatePair {
    /// The documented fallback pair.
    pub fn fallback() -> Self {
        Self {
            krw_per_usd: DEFAULT_KRW_PER_USD,
            usd_per_eur: DEFAULT_USD_PER_EUR,
        }
    }

    /// True when both rates are finite and inside their plausible bands.
    pub fn is_valid(&self) -> bool {
        is_valid_krw_per_usd(self.krw_per_usd) && is_valid_usd_per_eur(self.usd_per_eur)
    }
}
