//! Scalar summaries of a growth run
//!
//! All functions are pure. Vanishing denominators are not trapped and yield
//! infinities or NaN.

use std::f64::consts::E;

/// Holds the summary metrics of one simulation run
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowthMetrics {
    pub growth_rate: f64,
    pub latency_duration: f64,
    pub max_population_density: f64,
}

/// Calculates the kinetic growth rate with the literal formula
///
/// ```text
/// (Yxs S0 + X) / (Yxs S0 + X)
/// ```
///
/// The numerator equals the denominator, thus the result is always one
/// (or NaN when Yxs S0 + X = 0). Select [crate::GrowthRateFormula::Specific]
/// for the peak specific growth rate instead.
pub fn monod_growth_rate(x: f64, yxs: f64, s0: f64) -> f64 {
    (yxs * s0 + x) / (yxs * s0 + x)
}

/// Calculates the kinetic latency duration from the computed growth rate
pub fn monod_latency_duration(growth_rate: f64) -> f64 {
    (growth_rate - 1.0) / growth_rate
}

/// Calculates the kinetic maximum population density
pub fn monod_max_population_density(x0: f64, yxs: f64, s0: f64) -> f64 {
    x0 + (yxs * s0 + x0) / (yxs * s0)
}

/// Calculates the maximum growth rate of the Gompertz curve, B C / e
pub fn gompertz_growth_rate(b: f64, c: f64) -> f64 {
    b * c / E
}

/// Calculates the lag-phase duration of the Gompertz curve, (M - 1) / B
pub fn gompertz_latency_duration(m: f64, b: f64) -> f64 {
    (m - 1.0) / b
}

/// Calculates the maximum population density of the Gompertz curve, X0 + C
pub fn gompertz_max_population_density(x0: f64, c: f64) -> f64 {
    x0 + c
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
