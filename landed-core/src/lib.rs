pub mod calculations;
pub mod calculator;
pub mod models;
pub mod state;

pub use calculator::Calculator;
pub use models::*;
pub use state::{CalculatorAction, CalculatorState, CarPriceUpdater, reduce};
