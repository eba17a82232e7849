//! The rate-fetch collaborator boundary.
//!
//! The actual transport (HTTP client, cached feed, test double) lives
//! behind [`RateSource`]; this crate only sees its typed result. A failed
//! or implausible fetch degrades to the documented fallback pair with
//! `is_fallback` set — no error ever propagates toward the state model.

use async_trait::async_trait;
use landed_core::models::{DEFAULT_KRW_PER_USD, DEFAULT_USD_PER_EUR, RatePair};
use thiserror::Error;

/// One fetched exchange-rate quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub krw_per_usd: f64,
    pub usd_per_eur: f64,
    /// True when the pair is the documented fallback rather than live data.
    pub is_fallback: bool,
    /// Epoch milliseconds of the fetch.
    pub fetched_at: i64,
}

impl RateQuote {
    /// The documented fallback quote.
    pub fn fallback(fetched_at: i64) -> Self {
        Self {
            krw_per_usd: DEFAULT_KRW_PER_USD,
            usd_per_eur: DEFAULT_USD_PER_EUR,
            is_fallback: true,
            fetched_at,
        }
    }

    pub fn rates(&self) -> RatePair {
        RatePair {
            krw_per_usd: self.krw_per_usd,
            usd_per_eur: self.usd_per_eur,
        }
    }

    /// True when both rates are finite and inside their plausible bands.
    pub fn is_usable(&self) -> bool {
        self.rates().is_valid()
    }
}

#[derive(Debug, Error)]
pub enum RateSourceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed rate payload: {0}")]
    Malformed(String),
}

/// Opaque fetcher of the current KRW/USD and USD/EUR rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateQuote, RateSourceError>;
}

/// Fetches one quote, substituting the flagged fallback pair on transport
/// failure or out-of-band data. Infallible by design of the contract.
pub async fn fetch_or_fallback(
    source: &dyn RateSource,
    now_ms: i64,
) -> RateQuote {
    match source.fetch().await {
        Ok(quote) if quote.is_usable() => quote,
        Ok(quote) => {
            tracing::warn!(
                krw_per_usd = quote.krw_per_usd,
                usd_per_eur = quote.usd_per_eur,
                "fetched rates out of band, using fallback"
            );
            RateQuote::fallback(now_ms)
        }
        Err(error) => {
            tracing::warn!(%error, "rate fetch failed, using fallback");
            RateQuote::fallback(now_ms)
        }
    }
}
