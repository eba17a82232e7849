use serde::{Deserialize, Serialize};

use crate::models::{
    ContainerType, CostScenario, DEFAULT_KRW_PER_USD, DEFAULT_USD_PER_EUR, RatePair,
};

/// All inputs of the pricing engine, owned by the reducer.
///
/// There is exactly one authoritative copy per calculator; every mutation
/// goes through [`reduce`](crate::state::reduce), which keeps the state
/// invariant: `car_prices.len() == number_of_cars`, `number_of_cars` inside
/// the container capacity, every price inside `[0, MAX_CAR_PRICE_EUR]`, and
/// no non-finite numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Purchase price per vehicle, EUR. Always `number_of_cars` entries.
    pub car_prices: Vec<f64>,
    pub krw_per_usd_rate: f64,
    pub usd_per_eur_rate: f64,
    /// Customs duty percentage, 0–30.
    pub customs_duty: f64,
    /// Import VAT percentage, 0–25.
    pub vat: f64,
    /// Document pages to translate, 0–300.
    pub translation_pages: f64,
    /// Homologation cost in EUR, 0–10 000.
    pub homologation_fee: f64,
    /// Free-form extra cost in EUR, 0–50 000.
    pub miscellaneous: f64,
    pub scenario: CostScenario,
    pub number_of_cars: usize,
    pub container_type: ContainerType,
    pub auto_update_fx: bool,
    /// Last rate pair known to be in-band, kept for user-triggered revert.
    pub last_valid_rates: Option<RatePair>,
    /// Epoch milliseconds of the last applied rate refresh.
    pub last_updated_at: Option<i64>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            car_prices: vec![0.0],
            krw_per_usd_rate: DEFAULT_KRW_PER_USD,
            usd_per_eur_rate: DEFAULT_USD_PER_EUR,
            customs_duty: 10.0,
            vat: 21.0,
            translation_pages: 0.0,
            homologation_fee: 0.0,
            miscellaneous: 0.0,
            scenario: CostScenario::Physical,
            number_of_cars: 1,
            container_type: ContainerType::FortyFoot,
            auto_update_fx: true,
            last_valid_rates: None,
            last_updated_at: None,
        }
    }
}

impl CalculatorState {
    /// Current rate pair as a unit.
    pub fn rates(&self) -> RatePair {
        RatePair {
            krw_per_usd: self.krw_per_usd_rate,
            usd_per_eur: self.usd_per_eur_rate,
        }
    }
}
