use crate::{GrowthMetrics, GrowthRateFormula, StrError};
use russell_lab::Vector;

pub trait ModelTrait {
    /// Returns the number of state variables
    fn ndim(&self) -> usize;

    /// Returns the state vector at t = 0 given the initial biomass
    fn initial_state(&self, x0: f64) -> Vec<f64>;

    /// Calculates f = dy/dt at (t, y)
    fn calc_f(&self, f: &mut Vector, t: f64, y: &Vector) -> Result<(), StrError>;

    /// Calculates the growth metrics from the initial biomass and the final state
    fn calc_metrics(&self, x0: f64, y_final: &[f64], formula: GrowthRateFormula) -> GrowthMetrics;
}
