//! Normalized calculator state and its reducer.

mod action;
mod model;
mod reducer;

pub use action::{CalculatorAction, CarPriceUpdater};
pub use model::CalculatorState;
pub use reducer::reduce;
