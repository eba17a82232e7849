//! Exchange-rate refresh for the landed-cost calculator.
//!
//! The actual rate transport lives behind the [`RateSource`] trait; this
//! crate validates what comes back, substitutes the documented fallback
//! pair when it must, and schedules re-fetches with capped exponential
//! backoff. Fetched rates enter the state model exclusively through the
//! standard reducer actions — see [`apply_quote`].

pub mod backoff;
pub mod controller;
pub mod source;

pub use backoff::{BASE_INTERVAL, MAX_INTERVAL, backoff_delay};
pub use controller::{ApplyRates, RefreshController, RefreshPhase};
pub use source::{RateQuote, RateSource, RateSourceError, fetch_or_fallback};

use landed_core::Calculator;
use landed_core::state::CalculatorAction;

/// Applies a fetched quote to a calculator through the standard reducer
/// actions.
///
/// Both rates are merged via `SetRates`, which keeps the previous value for
/// anything out of band. Only live (non-fallback) quotes become the revert
/// history in `last_valid_rates`.
pub fn apply_quote(
    calculator: &mut Calculator,
    quote: RateQuote,
) {
    calculator.dispatch(CalculatorAction::SetRates {
        krw_per_usd: Some(quote.krw_per_usd),
        usd_per_eur: Some(quote.usd_per_eur),
    });
    if !quote.is_fallback {
        calculator.dispatch(CalculatorAction::SetLastValidRates(Some(quote.rates())));
    }
    calculator.dispatch(CalculatorAction::SetLastUpdatedAt(Some(quote.fetched_at)));
}
