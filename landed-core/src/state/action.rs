use std::fmt;

use crate::models::{ContainerType, CostScenario, RatePair};
use crate::state::CalculatorState;

/// A deferred transformation of the car price array, applied against the
/// current array inside the reducer. The result is normalized like any
/// direct price update.
pub struct CarPriceUpdater(Box<dyn FnOnce(&[f64]) -> Vec<f64> + Send>);

impl CarPriceUpdater {
    pub fn new(update: impl FnOnce(&[f64]) -> Vec<f64> + Send + 'static) -> Self {
        Self(Box::new(update))
    }

    pub(crate) fn apply(
        self,
        current: &[f64],
    ) -> Vec<f64> {
        (self.0)(current)
    }
}

impl fmt::Debug for CarPriceUpdater {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("CarPriceUpdater")
    }
}

/// Every mutation the calculator state supports.
#[derive(Debug)]
pub enum CalculatorAction {
    SetCarPrices(Vec<f64>),
    UpdateCarPrices(CarPriceUpdater),
    SetNumberOfCars(usize),
    SetScenario(CostScenario),
    SetContainerType(ContainerType),
    SetCustomsDuty(f64),
    SetVat(f64),
    SetTranslationPages(f64),
    SetHomologationFee(f64),
    SetMiscellaneous(f64),
    SetAutoUpdateFx(bool),
    /// Partial update: only the provided rate fields are merged.
    SetRates {
        krw_per_usd: Option<f64>,
        usd_per_eur: Option<f64>,
    },
    SetLastValidRates(Option<RatePair>),
    SetLastUpdatedAt(Option<i64>),
    /// Wholesale replacement, bypassing all clamping. The caller is
    /// responsible for handing in a state that satisfies the invariants.
    Reset(Box<CalculatorState>),
}
