//! Fixed fee constants and input bounds for the cost calculation.

/// Upper bound for a single vehicle purchase price, in EUR.
pub const MAX_CAR_PRICE_EUR: f64 = 500_000.0;

/// Document translation cost per page, in EUR.
pub const TRANSLATION_PER_PAGE_EUR: f64 = 35.0;

/// Flat port agent service fee per vehicle, in EUR. The container's local
/// handling surcharge is divided across vehicles on top of this.
pub const PORT_AGENT_BASE_EUR: f64 = 250.0;

/// Speditor (customs broker) flat fee, VAT-exclusive, in EUR.
pub const SPEDITOR_BASE_FEE_EUR: f64 = 150.0;

/// VAT rate applied to the speditor fee.
pub const SPEDITOR_VAT_RATE: f64 = 0.21;

pub const MAX_CUSTOMS_DUTY_PCT: f64 = 30.0;
pub const MAX_VAT_PCT: f64 = 25.0;
pub const MAX_TRANSLATION_PAGES: f64 = 300.0;
pub const MAX_HOMOLOGATION_FEE_EUR: f64 = 10_000.0;
pub const MAX_MISCELLANEOUS_EUR: f64 = 50_000.0;

/// The speditor fee as invoiced: VAT-inclusive.
///
/// The engine receives this gross amount and splits it back into net and
/// VAT portions for company refund accounting.
pub fn speditor_fee_gross() -> f64 {
    SPEDITOR_BASE_FEE_EUR * (1.0 + SPEDITOR_VAT_RATE)
}
