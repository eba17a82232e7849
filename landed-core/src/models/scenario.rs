use serde::{Deserialize, Serialize};

/// Who imports the vehicles: a private person or a VAT-registered company.
///
/// A company can reclaim the import VAT and the VAT portion of the
/// speditor's flat fee, which is what `vat_refund` and
/// `net_cost_for_company` in the breakdown express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostScenario {
    #[default]
    #[serde(rename = "physical")]
    Physical,
    #[serde(rename = "company")]
    Company,
}

impl CostScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Company => "company",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "physical" => Some(Self::Physical),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}
