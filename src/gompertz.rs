use crate::metrics::{gompertz_growth_rate, gompertz_latency_duration, gompertz_max_population_density};
use crate::{GrowthMetrics, GrowthRateFormula, ModelTrait, StrError};
use russell_lab::Vector;
use std::collections::HashMap;

/// Implements the Gompertz growth curve
///
/// ```text
/// G(t) = C exp(-exp(-B (t - M)))
///
/// dX
/// ── = G'(t) = B G(t) exp(-B (t - M))
/// dt
/// ```
///
/// The integrated biomass is X(t) = X0 + G(t) - G(0); thus X(M) differs
/// from the curve value G(M) = C/e by X0 - G(0)
pub struct Gompertz {
    c: f64, // asymptotic biomass (C)
    m: f64, // inflection time (M)
    b: f64, // relative growth rate (B)
}

impl Gompertz {
    /// Allocates a new instance
    ///
    /// # Parameters
    ///
    /// * `c` - asymptotic biomass (C); microbial count as time grows indefinitely
    /// * `m` - inflection time (M); time to reach the maximum growth rate
    /// * `b` - relative growth rate (B)
    pub fn new(params: HashMap<&str, f64>) -> Result<Self, StrError> {
        let c = *params.get("c").ok_or("Parameter 'c' not found")?;
        let m = *params.get("m").ok_or("Parameter 'm' not found")?;
        let b = *params.get("b").ok_or("Parameter 'b' not found")?;
        Ok(Gompertz { c, m, b })
    }

    /// Calculates the curve value G(t)
    pub fn curve_value(&self, t: f64) -> f64 {
        self.c * f64::exp(-f64::exp(-self.b * (t - self.m)))
    }

    /// Calculates the slope of the curve dG/dt
    pub fn curve_slope(&self, t: f64) -> f64 {
        let e = f64::exp(-self.b * (t - self.m));
        self.b * self.c * e * f64::exp(-e)
    }

    /// Calculates the integrated biomass X(t) starting from x0 at t = 0
    pub fn analytical_x(&self, x0: f64, t: f64) -> f64 {
        x0 + self.curve_value(t) - self.curve_value(0.0)
    }
}

impl ModelTrait for Gompertz {
    fn ndim(&self) -> usize {
        1
    }

    fn initial_state(&self, x0: f64) -> Vec<f64> {
        vec![x0]
    }

    /// Calculates f = {dX/dt}
    ///
    /// The biomass is not used (the rate depends on time only)
    fn calc_f(&self, f: &mut Vector, t: f64, _y: &Vector) -> Result<(), StrError> {
        f[0] = self.curve_slope(t);
        Ok(())
    }

    fn calc_metrics(&self, x0: f64, _y_final: &[f64], _formula: GrowthRateFormula) -> GrowthMetrics {
        GrowthMetrics {
            growth_rate: gompertz_growth_rate(self.b, self.c),
            latency_duration: gompertz_latency_duration(self.m, self.b),
            max_population_density: gompertz_max_population_density(x0, self.c),
        }
    }
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
