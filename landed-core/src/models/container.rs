use serde::{Deserialize, Serialize};

/// Shipping container size for a sea-freight consignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerType {
    #[serde(rename = "20ft")]
    TwentyFoot,
    #[default]
    #[serde(rename = "40ft")]
    FortyFoot,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwentyFoot => "20ft",
            Self::FortyFoot => "40ft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "20ft" => Some(Self::TwentyFoot),
            "40ft" => Some(Self::FortyFoot),
            _ => None,
        }
    }

    /// Freight and capacity figures for this container size.
    pub fn spec(&self) -> &'static ContainerSpec {
        match self {
            Self::TwentyFoot => &SPEC_20FT,
            Self::FortyFoot => &SPEC_40FT,
        }
    }

    /// Maximum number of vehicles that fit into this container.
    pub fn capacity(&self) -> usize {
        self.spec().max_cars
    }
}

/// Cost and capacity entry of the per-container freight table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSpec {
    /// Maximum number of vehicles per container.
    pub max_cars: usize,
    /// Ocean freight for the whole container, quoted in USD.
    pub freight_usd: f64,
    /// Local handling surcharge for the whole container, quoted in EUR.
    /// Charged by the port agent, not part of ocean freight.
    pub local_eur: f64,
}

const SPEC_20FT: ContainerSpec = ContainerSpec {
    max_cars: 2,
    freight_usd: 3150.0,
    local_eur: 350.0,
};

const SPEC_40FT: ContainerSpec = ContainerSpec {
    max_cars: 4,
    freight_usd: 4150.0,
    local_eur: 420.0,
};
