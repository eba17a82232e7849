use serde::Serialize;

/// Itemized landed cost for a single vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarCost {
    /// 1-based position of the vehicle in the container.
    pub car_index: usize,
    /// Purchase price after normalization (never negative).
    pub car_price: f64,
    /// Cost, insurance and freight: purchase price plus freight share.
    pub cif: f64,
    /// Customs duty on the CIF value.
    pub customs: f64,
    /// Import VAT on CIF plus duty.
    pub vat_amount: f64,
    /// Sum of the fixed fee shares: speditor, homologation, translation,
    /// port agent and miscellaneous.
    pub fixed_fees: f64,
    /// Everything except the purchase price itself.
    pub cost_without_car: f64,
    /// Total landed cost for this vehicle.
    pub final_cost: f64,
    /// Reclaimable VAT under the company scenario, 0 otherwise.
    pub vat_refund: f64,
    /// `final_cost` net of the refund; equals `final_cost` for a private
    /// import.
    pub net_cost_for_company: f64,
}

/// Sums of the per-car fields across all active vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostTotals {
    pub car_price: f64,
    pub cif: f64,
    pub customs: f64,
    pub vat_amount: f64,
    pub final_cost: f64,
    pub vat_refund: f64,
    pub net_cost_for_company: f64,
}

impl CostTotals {
    pub(crate) fn add(&mut self, car: &CarCost) {
        self.car_price += car.car_price;
        self.cif += car.cif;
        self.customs += car.customs;
        self.vat_amount += car.vat_amount;
        self.final_cost += car.final_cost;
        self.vat_refund += car.vat_refund;
        self.net_cost_for_company += car.net_cost_for_company;
    }
}

/// Full itemized result of one landed-cost computation.
///
/// This is a derived view over the calculator state, recomputed whenever an
/// input changes. It carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Ocean freight for the whole container, converted to EUR.
    pub freight_per_container_eur: f64,
    /// Freight share of one vehicle.
    pub freight_per_car: f64,
    /// Port agent fee per vehicle: local surcharge share plus flat base.
    pub port_agent_fee_per_car: f64,
    /// Document translation cost per vehicle.
    pub translation_per_car: f64,
    /// Speditor flat fee as invoiced (VAT-inclusive).
    pub speditor_fee: f64,
    /// VAT-exclusive portion of the speditor fee.
    pub speditor_net: f64,
    /// VAT portion of the speditor fee, reclaimable by a company.
    pub speditor_vat_portion: f64,
    /// One entry per active vehicle, in container order.
    pub cars: Vec<CarCost>,
    pub totals: CostTotals,
}
