use crate::metrics::{monod_growth_rate, monod_latency_duration, monod_max_population_density};
use crate::{GrowthMetrics, GrowthRateFormula, ModelTrait, StrError};
use russell_lab::Vector;
use std::collections::HashMap;

/// Implements the Monod (substrate-limited) growth model
///
/// ```text
///          S
/// μ = μmax ──────
///          Ks + S
///
/// dX         dS     1   dX
/// ── = μ X   ── = - ─── ──
/// dt         dt     Yxs dt
/// ```
///
/// where:
///
/// * X is the biomass concentration
/// * S is the substrate concentration
/// * μ is the specific growth rate
pub struct Monod {
    umax: f64, // maximum specific growth rate (μmax)
    yxs: f64,  // yield coefficient (Yxs)
    s0: f64,   // initial substrate concentration (S0)
    ks: f64,   // half-saturation constant (Ks)
}

impl Monod {
    /// Allocates a new instance
    ///
    /// # Parameters
    ///
    /// * `umax` - maximum specific growth rate (μmax)
    /// * `yxs` - yield coefficient (Yxs); biomass produced per unit substrate consumed
    /// * `s0` - initial substrate concentration (S0)
    /// * `ks` - half-saturation constant (Ks)
    pub fn new(params: HashMap<&str, f64>) -> Result<Self, StrError> {
        let umax = *params.get("umax").ok_or("Parameter 'umax' not found")?;
        let yxs = *params.get("yxs").ok_or("Parameter 'yxs' not found")?;
        let s0 = *params.get("s0").ok_or("Parameter 's0' not found")?;
        let ks = *params.get("ks").ok_or("Parameter 'ks' not found")?;
        Ok(Monod { umax, yxs, s0, ks })
    }

    /// Calculates the specific growth rate μ(S)
    ///
    /// Returns an error if Ks + S = 0
    pub fn specific_growth_rate(&self, s: f64) -> Result<f64, StrError> {
        let den = self.ks + s;
        if den == 0.0 {
            return Err("NumericalInstability: Ks + S = 0 in the Monod saturation term");
        }
        Ok(self.umax * s / den)
    }

    /// Calculates (dX/dt, dS/dt) at (X, S)
    pub fn rates(&self, x: f64, s: f64) -> Result<(f64, f64), StrError> {
        let mu = self.specific_growth_rate(s)?;
        let dx_dt = x * mu;
        let ds_dt = (-1.0 / self.yxs) * dx_dt;
        Ok((dx_dt, ds_dt))
    }
}

impl ModelTrait for Monod {
    fn ndim(&self) -> usize {
        2
    }

    fn initial_state(&self, x0: f64) -> Vec<f64> {
        vec![x0, self.s0]
    }

    /// Calculates f = {dX/dt, dS/dt}
    ///
    /// The time is not used (autonomous system)
    fn calc_f(&self, f: &mut Vector, _t: f64, y: &Vector) -> Result<(), StrError> {
        let (dx_dt, ds_dt) = self.rates(y[0], y[1])?;
        f[0] = dx_dt;
        f[1] = ds_dt;
        Ok(())
    }

    fn calc_metrics(&self, x0: f64, y_final: &[f64], formula: GrowthRateFormula) -> GrowthMetrics {
        let growth_rate = match formula {
            GrowthRateFormula::Literal => monod_growth_rate(y_final[0], self.yxs, self.s0),
            GrowthRateFormula::Specific => self.specific_growth_rate(self.s0).unwrap_or(f64::NAN),
        };
        GrowthMetrics {
            growth_rate,
            latency_duration: monod_latency_duration(growth_rate),
            max_population_density: monod_max_population_density(x0, self.yxs, self.s0),
        }
    }
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
