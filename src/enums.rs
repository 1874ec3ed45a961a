use crate::StrError;
use clap::ValueEnum;
use russell_ode::Method;

/// Selects the growth model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelType {
    /// Substrate-limited kinetics (biomass and substrate)
    Monod,

    /// Sigmoidal growth curve (biomass only)
    Gompertz,
}

impl ModelType {
    /// Converts the menu selector (1 or 2) into a model type
    pub fn from_selector(selector: i64) -> Result<Self, StrError> {
        match selector {
            1 => Ok(ModelType::Monod),
            2 => Ok(ModelType::Gompertz),
            _ => Err("Invalid choice. Please enter 1 or 2."),
        }
    }

    /// Returns the name used in reports and figure titles
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::Monod => "Monod",
            ModelType::Gompertz => "Gompertz",
        }
    }
}

/// Selects the formula of the kinetic (Monod) growth rate metric
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GrowthRateFormula {
    /// (Yxs S0 + X) / (Yxs S0 + X), which is always one
    #[default]
    Literal,

    /// Peak specific growth rate μmax S0 / (Ks + S0)
    Specific,
}

/// Adaptive ODE methods available to the integrator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OdeMethod {
    Radau5,
    Merson4,
    Zonneveld4,
    Fehlberg4,
    #[default]
    #[value(name = "dopri5")]
    DoPri5,
    Verner6,
    Fehlberg7,
    #[value(name = "dopri8")]
    DoPri8,
}

impl OdeMethod {
    /// Returns the corresponding russell_ode method
    pub fn method(&self) -> Method {
        match self {
            OdeMethod::Radau5 => Method::Radau5,
            OdeMethod::Merson4 => Method::Merson4,
            OdeMethod::Zonneveld4 => Method::Zonneveld4,
            OdeMethod::Fehlberg4 => Method::Fehlberg4,
            OdeMethod::DoPri5 => Method::DoPri5,
            OdeMethod::Verner6 => Method::Verner6,
            OdeMethod::Fehlberg7 => Method::Fehlberg7,
            OdeMethod::DoPri8 => Method::DoPri8,
        }
    }
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
