//! One complete simulation run: grid, integration, metrics, and figure
//!
//! Every run allocates its own [Model], thus nothing is shared between runs.

use crate::model::{DEFAULT_ABS_TOL, DEFAULT_REL_TOL};
use crate::plot::plot_trajectory;
use crate::{GrowthError, GrowthMetrics, GrowthRateFormula, GrowthResult, Model, ModelType, OdeMethod, Trajectory};
use plotpy::linspace;
use std::collections::HashMap;
use std::path::PathBuf;

/// Default number of points of the time grid
pub const DEFAULT_NPOINT: usize = 1000;

/// Holds the model inputs of one run
#[derive(Clone, Debug)]
pub struct SimulationRequest {
    /// which growth model to simulate
    pub model_type: ModelType,

    /// model parameters by name (e.g. "umax", "yxs", "s0", "ks" or "c", "m", "b")
    pub params: HashMap<&'static str, f64>,

    /// initial biomass (X0)
    pub x0: f64,

    /// duration of the simulation in hours
    pub duration: f64,
}

impl SimulationRequest {
    /// Allocates a Monod request
    pub fn monod(umax: f64, yxs: f64, s0: f64, ks: f64, x0: f64, duration: f64) -> Self {
        SimulationRequest {
            model_type: ModelType::Monod,
            params: HashMap::from([("umax", umax), ("yxs", yxs), ("s0", s0), ("ks", ks)]),
            x0,
            duration,
        }
    }

    /// Allocates a Gompertz request
    pub fn gompertz(c: f64, m: f64, b: f64, x0: f64, duration: f64) -> Self {
        SimulationRequest {
            model_type: ModelType::Gompertz,
            params: HashMap::from([("c", c), ("m", m), ("b", b)]),
            x0,
            duration,
        }
    }
}

/// Holds the numerical settings shared by all runs
#[derive(Clone, Debug)]
pub struct SimulationSettings {
    pub npoint: usize,
    pub method: OdeMethod,
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub growth_rate_formula: GrowthRateFormula,

    /// figure file; no figure is generated if None
    pub plot_path: Option<PathBuf>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            npoint: DEFAULT_NPOINT,
            method: OdeMethod::default(),
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
            growth_rate_formula: GrowthRateFormula::default(),
            plot_path: None,
        }
    }
}

/// Holds the results of one run
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    pub model_type: ModelType,
    pub trajectory: Trajectory,
    pub metrics: GrowthMetrics,
}

/// Runs one simulation
pub fn run_simulation(request: &SimulationRequest, settings: &SimulationSettings) -> GrowthResult<SimulationOutcome> {
    if settings.npoint < 2 {
        return Err(GrowthError::InvalidSettings("the number of points must be at least 2"));
    }
    if request.duration.is_nan() || request.duration <= 0.0 {
        return Err(GrowthError::InvalidSettings("the duration must be positive"));
    }

    tracing::info!(
        model = request.model_type.name(),
        method = ?settings.method,
        duration = request.duration,
        npoint = settings.npoint,
        "starting simulation"
    );

    let tt = linspace(0.0, request.duration, settings.npoint);
    let mut model = Model::with_tolerances(
        request.model_type,
        request.params.clone(),
        settings.method.method(),
        settings.abs_tol,
        settings.rel_tol,
    )
    .map_err(GrowthError::Simulation)?;

    let trajectory = model.simulate(request.x0, &tt).map_err(GrowthError::Simulation)?;
    let metrics = model.metrics(request.x0, &trajectory, settings.growth_rate_formula);

    tracing::debug!(
        growth_rate = metrics.growth_rate,
        latency_duration = metrics.latency_duration,
        max_population_density = metrics.max_population_density,
        "computed growth metrics"
    );

    if let Some(path) = &settings.plot_path {
        plot_trajectory(request.model_type, &trajectory, path).map_err(GrowthError::Plot)?;
        tracing::info!(path = %path.display(), "saved figure");
    }

    Ok(SimulationOutcome {
        model_type: request.model_type,
        trajectory,
        metrics,
    })
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
