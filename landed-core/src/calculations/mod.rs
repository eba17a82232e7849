//! Calculation modules for the landed-cost engine.
//!
//! `currency` holds the pure KRW/USD/EUR conversions and the tolerant
//! free-text amount parser; `landed_cost` is the itemized per-container
//! pricing routine.

pub mod currency;
pub mod landed_cost;

pub use landed_cost::{LandedCostInput, calculate};
