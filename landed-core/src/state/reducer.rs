//! The single synchronous transition function over [`CalculatorState`].
//!
//! Every transition re-establishes the state invariant before returning, so
//! no sequence of actions can observe a state where the price array length
//! disagrees with the vehicle count or any numeric field is out of range.

use crate::models::fees::{
    MAX_CAR_PRICE_EUR, MAX_CUSTOMS_DUTY_PCT, MAX_HOMOLOGATION_FEE_EUR, MAX_MISCELLANEOUS_EUR,
    MAX_TRANSLATION_PAGES, MAX_VAT_PCT,
};
use crate::models::{ContainerType, is_valid_krw_per_usd, is_valid_usd_per_eur};
use crate::state::{CalculatorAction, CalculatorState};

/// Applies one action and returns the next state.
///
/// Pure and deterministic. Out-of-range numeric input is clamped; non-finite
/// fee or rate input falls back to the previous value; vehicle counts clamp
/// into the container capacity.
pub fn reduce(
    mut state: CalculatorState,
    action: CalculatorAction,
) -> CalculatorState {
    match action {
        CalculatorAction::SetCarPrices(prices) => {
            state.car_prices = prices;
            renormalize_prices(&mut state);
        }
        CalculatorAction::UpdateCarPrices(updater) => {
            state.car_prices = updater.apply(&state.car_prices);
            renormalize_prices(&mut state);
        }
        CalculatorAction::SetNumberOfCars(count) => {
            state.number_of_cars = clamp_car_count(count, state.container_type);
            renormalize_prices(&mut state);
        }
        CalculatorAction::SetContainerType(container) => {
            state.container_type = container;
            state.number_of_cars = clamp_car_count(state.number_of_cars, container);
            renormalize_prices(&mut state);
        }
        CalculatorAction::SetScenario(scenario) => state.scenario = scenario,
        CalculatorAction::SetCustomsDuty(value) => {
            state.customs_duty = clamp_or_previous(value, state.customs_duty, MAX_CUSTOMS_DUTY_PCT);
        }
        CalculatorAction::SetVat(value) => {
            state.vat = clamp_or_previous(value, state.vat, MAX_VAT_PCT);
        }
        CalculatorAction::SetTranslationPages(value) => {
            state.translation_pages =
                clamp_or_previous(value, state.translation_pages, MAX_TRANSLATION_PAGES);
        }
        CalculatorAction::SetHomologationFee(value) => {
            state.homologation_fee =
                clamp_or_previous(value, state.homologation_fee, MAX_HOMOLOGATION_FEE_EUR);
        }
        CalculatorAction::SetMiscellaneous(value) => {
            state.miscellaneous =
                clamp_or_previous(value, state.miscellaneous, MAX_MISCELLANEOUS_EUR);
        }
        CalculatorAction::SetAutoUpdateFx(enabled) => state.auto_update_fx = enabled,
        CalculatorAction::SetRates {
            krw_per_usd,
            usd_per_eur,
        } => {
            if let Some(rate) = krw_per_usd
                && is_valid_krw_per_usd(rate)
            {
                state.krw_per_usd_rate = rate;
            }
            if let Some(rate) = usd_per_eur
                && is_valid_usd_per_eur(rate)
            {
                state.usd_per_eur_rate = rate;
            }
        }
        CalculatorAction::SetLastValidRates(rates) => state.last_valid_rates = rates,
        CalculatorAction::SetLastUpdatedAt(timestamp) => state.last_updated_at = timestamp,
        CalculatorAction::Reset(new_state) => return *new_state,
    }
    state
}

fn clamp_car_count(
    count: usize,
    container: ContainerType,
) -> usize {
    count.clamp(1, container.capacity())
}

/// Re-derives the price array against the current vehicle count: truncate
/// when shrinking, zero-pad when growing, clamp every surviving entry.
fn renormalize_prices(state: &mut CalculatorState) {
    state.number_of_cars = clamp_car_count(state.number_of_cars, state.container_type);
    state.car_prices.resize(state.number_of_cars, 0.0);
    for price in &mut state.car_prices {
        *price = clamp_price(*price);
    }
}

fn clamp_price(price: f64) -> f64 {
    if price.is_finite() {
        price.clamp(0.0, MAX_CAR_PRICE_EUR)
    } else {
        0.0
    }
}

fn clamp_or_previous(
    value: f64,
    previous: f64,
    max: f64,
) -> f64 {
    if value.is_finite() { value.clamp(0.0, max) } else { previous }
}
