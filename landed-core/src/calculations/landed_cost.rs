//! Landed-cost computation for a container of imported vehicles.
//!
//! This is the one canonical pricing routine: it always operates on a price
//! array, and a single-vehicle import is just the degenerate one-entry case.
//!
//! # Cost structure
//!
//! | Item | Basis |
//! |------|-------|
//! | Freight | container freight in USD × EUR-per-USD factor, split per car |
//! | Port agent | container local surcharge split per car + flat base fee |
//! | Translation | pages × per-page rate, charged per car |
//! | Customs duty | percentage of CIF (price + freight share) |
//! | Import VAT | percentage of CIF + duty |
//! | Speditor | VAT-inclusive flat fee per car |
//! | Homologation, miscellaneous | flat per-car amounts |
//!
//! Under the company scenario the import VAT and the VAT portion of the
//! speditor fee are reclaimable, which yields `vat_refund` and
//! `net_cost_for_company`.
//!
//! # Example
//!
//! ```
//! use landed_core::calculations::{LandedCostInput, calculate};
//! use landed_core::models::{ContainerType, CostScenario};
//!
//! let input = LandedCostInput {
//!     car_prices: vec![10_000.0],
//!     usd_to_eur_rate: 1.0,
//!     customs_duty: 5.0,
//!     vat: 21.0,
//!     translation_pages: 3.0,
//!     homologation_fee: 250.0,
//!     miscellaneous: 0.0,
//!     scenario: CostScenario::Physical,
//!     number_of_cars: 1,
//!     container_type: ContainerType::FortyFoot,
//!     speditor_fee: 181.5,
//!     speditor_vat_rate: 0.21,
//! };
//!
//! let breakdown = calculate(&input);
//! assert_eq!(breakdown.freight_per_car, 4150.0);
//! assert_eq!(breakdown.cars[0].cif, 14_150.0);
//! ```

use crate::models::fees::{PORT_AGENT_BASE_EUR, TRANSLATION_PER_PAGE_EUR};
use crate::models::{CarCost, ContainerType, CostBreakdown, CostScenario, CostTotals};

/// Input values for one landed-cost computation.
///
/// All amounts are EUR unless stated otherwise. The engine computes with
/// whatever numbers it receives; rate validation happens upstream, in the
/// reducer and the hydration boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct LandedCostInput {
    /// Purchase price per vehicle. Missing entries count as 0; negative or
    /// non-finite entries are normalized to 0.
    pub car_prices: Vec<f64>,
    /// EUR obtained per USD: the inverse of the USD/EUR quote. A rate of 0
    /// propagates zero freight.
    pub usd_to_eur_rate: f64,
    /// Customs duty percentage on the CIF value.
    pub customs_duty: f64,
    /// Import VAT percentage on CIF plus duty.
    pub vat: f64,
    pub translation_pages: f64,
    pub homologation_fee: f64,
    pub miscellaneous: f64,
    pub scenario: CostScenario,
    /// Requested vehicle count; clamped to the container capacity.
    pub number_of_cars: usize,
    pub container_type: ContainerType,
    /// Speditor flat fee as invoiced (VAT-inclusive).
    pub speditor_fee: f64,
    /// VAT rate baked into `speditor_fee`.
    pub speditor_vat_rate: f64,
}

impl LandedCostInput {
    /// Builds the engine input from reducer-owned state, deriving the
    /// EUR-per-USD factor and the configured speditor fee.
    pub fn from_state(state: &crate::state::CalculatorState) -> Self {
        use crate::calculations::currency::eur_per_usd;
        use crate::models::fees::{SPEDITOR_VAT_RATE, speditor_fee_gross};

        Self {
            car_prices: state.car_prices.clone(),
            usd_to_eur_rate: eur_per_usd(state.usd_per_eur_rate),
            customs_duty: state.customs_duty,
            vat: state.vat,
            translation_pages: state.translation_pages,
            homologation_fee: state.homologation_fee,
            miscellaneous: state.miscellaneous,
            scenario: state.scenario,
            number_of_cars: state.number_of_cars,
            container_type: state.container_type,
            speditor_fee: speditor_fee_gross(),
            speditor_vat_rate: SPEDITOR_VAT_RATE,
        }
    }
}

/// Computes the full itemized breakdown.
///
/// Pure and deterministic: no I/O, no shared state, O(number of cars).
/// Cheap enough to run on every input change. All arithmetic stays in
/// `f64`; rounding is a presentation concern and never happens here.
pub fn calculate(input: &LandedCostInput) -> CostBreakdown {
    let spec = input.container_type.spec();
    let cars_count = input.number_of_cars.clamp(1, spec.max_cars);

    let freight_per_container_eur = spec.freight_usd * input.usd_to_eur_rate;
    let freight_per_car = freight_per_container_eur / cars_count as f64;
    let port_agent_fee_per_car = spec.local_eur / cars_count as f64 + PORT_AGENT_BASE_EUR;
    let translation_per_car = input.translation_pages * TRANSLATION_PER_PAGE_EUR;
    let (speditor_net, speditor_vat_portion) =
        split_speditor_fee(input.speditor_fee, input.speditor_vat_rate);

    let mut cars = Vec::with_capacity(cars_count);
    let mut totals = CostTotals::default();
    for index in 0..cars_count {
        let car_price = normalized_price(input.car_prices.get(index));
        let cif = car_price + freight_per_car;
        let customs = cif * input.customs_duty / 100.0;
        let vat_amount = (cif + customs) * input.vat / 100.0;
        let fixed_fees = input.speditor_fee
            + input.homologation_fee
            + translation_per_car
            + port_agent_fee_per_car
            + input.miscellaneous;
        let cost_without_car = freight_per_car + customs + vat_amount + fixed_fees;
        let final_cost = car_price + cost_without_car;

        let (vat_refund, net_cost_for_company) = match input.scenario {
            CostScenario::Company => {
                let refund = vat_amount + speditor_vat_portion;
                (refund, final_cost - refund)
            }
            CostScenario::Physical => (0.0, final_cost),
        };

        let car = CarCost {
            car_index: index + 1,
            car_price,
            cif,
            customs,
            vat_amount,
            fixed_fees,
            cost_without_car,
            final_cost,
            vat_refund,
            net_cost_for_company,
        };
        totals.add(&car);
        cars.push(car);
    }

    CostBreakdown {
        freight_per_container_eur,
        freight_per_car,
        port_agent_fee_per_car,
        translation_per_car,
        speditor_fee: input.speditor_fee,
        speditor_net,
        speditor_vat_portion,
        cars,
        totals,
    }
}

fn normalized_price(price: Option<&f64>) -> f64 {
    match price {
        Some(p) if p.is_finite() => p.max(0.0),
        _ => 0.0,
    }
}

/// Splits a VAT-inclusive fee into its net and VAT portions.
fn split_speditor_fee(
    fee: f64,
    vat_rate: f64,
) -> (f64, f64) {
    let net = if vat_rate > 0.0 { fee / (1.0 + vat_rate) } else { fee };
    (net, (fee - net).max(0.0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_close(
        actual: f64,
        expected: f64,
    ) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn base_input() -> LandedCostInput {
        LandedCostInput {
            car_prices: vec![10_000.0],
            usd_to_eur_rate: 1.0,
            customs_duty: 5.0,
            vat: 21.0,
            translation_pages: 3.0,
            homologation_fee: 250.0,
            miscellaneous: 0.0,
            scenario: CostScenario::Physical,
            number_of_cars: 1,
            container_type: ContainerType::FortyFoot,
            speditor_fee: 181.5,
            speditor_vat_rate: 0.21,
        }
    }

    #[test]
    fn single_car_in_forty_foot_container() {
        let breakdown = calculate(&base_input());

        assert_close(breakdown.freight_per_container_eur, 4150.0);
        assert_close(breakdown.freight_per_car, 4150.0);
        assert_close(breakdown.port_agent_fee_per_car, 670.0);
        assert_close(breakdown.translation_per_car, 105.0);

        let car = &breakdown.cars[0];
        assert_eq!(car.car_index, 1);
        assert_close(car.cif, 14_150.0);
        assert_close(car.customs, 707.5);
        assert_close(car.vat_amount, 3120.075);
        assert_close(car.final_cost, 19_184.075);
        assert_eq!(car.vat_refund, 0.0);
        assert_close(car.net_cost_for_company, car.final_cost);
    }

    #[test]
    fn two_cars_in_twenty_foot_container() {
        let input = LandedCostInput {
            car_prices: vec![8000.0, 9000.0],
            translation_pages: 1.0,
            number_of_cars: 2,
            container_type: ContainerType::TwentyFoot,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_close(breakdown.freight_per_car, 1575.0);
        assert_close(breakdown.port_agent_fee_per_car, 425.0);
        assert_close(breakdown.translation_per_car, 35.0);
        assert_close(breakdown.cars[0].final_cost, 13_056.5375);
        assert_close(breakdown.cars[1].final_cost, 14_327.0375);
    }

    #[test]
    fn totals_are_sums_of_per_car_fields() {
        let input = LandedCostInput {
            car_prices: vec![8000.0, 9000.0, 12_000.0],
            number_of_cars: 3,
            scenario: CostScenario::Company,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.cars.len(), 3);
        let checks: [(f64, fn(&CarCost) -> f64); 7] = [
            (breakdown.totals.car_price, |c| c.car_price),
            (breakdown.totals.cif, |c| c.cif),
            (breakdown.totals.customs, |c| c.customs),
            (breakdown.totals.vat_amount, |c| c.vat_amount),
            (breakdown.totals.final_cost, |c| c.final_cost),
            (breakdown.totals.vat_refund, |c| c.vat_refund),
            (breakdown.totals.net_cost_for_company, |c| c.net_cost_for_company),
        ];
        for (total, field) in checks {
            let sum: f64 = breakdown.cars.iter().map(field).sum();
            assert_eq!(total, sum);
        }
    }

    #[test]
    fn company_scenario_refunds_vat_and_speditor_vat_portion() {
        let input = LandedCostInput {
            scenario: CostScenario::Company,
            ..base_input()
        };

        let breakdown = calculate(&input);

        let car = &breakdown.cars[0];
        assert!(car.vat_refund >= car.vat_amount);
        assert_close(car.vat_refund, car.vat_amount + breakdown.speditor_vat_portion);
        assert_close(car.net_cost_for_company, car.final_cost - car.vat_refund);
    }

    #[test]
    fn company_refund_equals_vat_when_speditor_fee_has_no_vat() {
        let input = LandedCostInput {
            scenario: CostScenario::Company,
            speditor_fee: 150.0,
            speditor_vat_rate: 0.0,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.speditor_vat_portion, 0.0);
        assert_eq!(breakdown.cars[0].vat_refund, breakdown.cars[0].vat_amount);
    }

    #[test]
    fn zero_duty_and_vat_yield_zero_tax_fields() {
        let input = LandedCostInput {
            customs_duty: 0.0,
            vat: 0.0,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.cars[0].customs, 0.0);
        assert_eq!(breakdown.cars[0].vat_amount, 0.0);
    }

    #[test]
    fn negative_and_missing_prices_count_as_zero() {
        let input = LandedCostInput {
            car_prices: vec![-5000.0],
            number_of_cars: 2,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.cars[0].car_price, 0.0);
        assert_eq!(breakdown.cars[1].car_price, 0.0);
        assert_close(breakdown.cars[0].cif, breakdown.freight_per_car);
    }

    #[test]
    fn car_count_clamps_to_container_capacity() {
        let input = LandedCostInput {
            car_prices: vec![1000.0; 10],
            number_of_cars: 10,
            container_type: ContainerType::TwentyFoot,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.cars.len(), 2);
        assert_close(breakdown.freight_per_car, 1575.0);
    }

    #[test]
    fn zero_usd_rate_propagates_zero_freight() {
        let input = LandedCostInput {
            usd_to_eur_rate: 0.0,
            ..base_input()
        };

        let breakdown = calculate(&input);

        assert_eq!(breakdown.freight_per_container_eur, 0.0);
        assert_eq!(breakdown.freight_per_car, 0.0);
        assert_close(breakdown.cars[0].cif, 10_000.0);
    }
}
