mod breakdown;
mod container;
mod rates;
mod scenario;

pub mod fees;

pub use breakdown::{CarCost, CostBreakdown, CostTotals};
pub use container::{ContainerSpec, ContainerType};
pub use rates::{
    DEFAULT_KRW_PER_USD, DEFAULT_USD_PER_EUR, KRW_PER_USD_RANGE, RatePair, USD_PER_EUR_RANGE,
    is_valid_krw_per_usd, is_valid_usd_per_eur,
};
pub use scenario::CostScenario;
