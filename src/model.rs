use crate::{Gompertz, GrowthMetrics, GrowthRateFormula, ModelTrait, ModelType, Monod, StrError};
use russell_lab::Vector;
use russell_ode::{Method, OdeSolver, Params, System};
use std::collections::HashMap;

/// Default absolute tolerance of the ODE solver
pub const DEFAULT_ABS_TOL: f64 = 1e-8;

/// Default relative tolerance of the ODE solver
pub const DEFAULT_REL_TOL: f64 = 1e-8;

/// Holds the state of the system at every point of the time grid
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// time grid
    pub time: Vec<f64>,

    /// biomass concentration (X) at each time
    pub biomass: Vec<f64>,

    /// substrate concentration (S) at each time; only the Monod model tracks it
    pub substrate: Option<Vec<f64>>,
}

impl Trajectory {
    /// Returns the state vector at the last grid point
    pub fn final_state(&self) -> Vec<f64> {
        let mut state = Vec::with_capacity(2);
        if let Some(x) = self.biomass.last() {
            state.push(*x);
        }
        if let Some(s) = self.substrate.as_ref().and_then(|ss| ss.last()) {
            state.push(*s);
        }
        state
    }
}

/// Represents a microbial growth model coupled to an ODE solver
pub struct Model<'a> {
    model_type: ModelType,
    actual: Box<dyn ModelTrait>,
    ode_solver: OdeSolver<'a, Box<dyn ModelTrait>>,
}

impl<'a> Model<'a> {
    /// Allocates a new instance with the default tolerances
    pub fn new(model_type: ModelType, params: HashMap<&str, f64>, ode_method: Method) -> Result<Self, StrError> {
        Model::with_tolerances(model_type, params, ode_method, DEFAULT_ABS_TOL, DEFAULT_REL_TOL)
    }

    /// Allocates a new instance
    ///
    /// # Parameters
    ///
    /// * `model_type` - which growth model to integrate
    /// * `params` - the model parameters (see [Monod::new] and [Gompertz::new])
    /// * `ode_method` - the russell_ode method; implicit methods use a numerical Jacobian
    /// * `abs_tol` - absolute tolerance of the adaptive step control
    /// * `rel_tol` - relative tolerance of the adaptive step control
    pub fn with_tolerances(
        model_type: ModelType,
        params: HashMap<&str, f64>,
        ode_method: Method,
        abs_tol: f64,
        rel_tol: f64,
    ) -> Result<Self, StrError> {
        let actual: Box<dyn ModelTrait> = match model_type {
            ModelType::Monod => Box::new(Monod::new(params)?),
            ModelType::Gompertz => Box::new(Gompertz::new(params)?),
        };
        let mut ode_params = Params::new(ode_method);
        ode_params.newton.use_numerical_jacobian = true;
        ode_params.set_tolerances(abs_tol, rel_tol, None)?;
        let ode_system = System::new(actual.ndim(), |f, t, y, args: &mut Box<dyn ModelTrait>| {
            args.calc_f(f, t, y)
        });
        let ode_solver = OdeSolver::new(ode_params, ode_system)?;
        Ok(Model {
            model_type,
            actual,
            ode_solver,
        })
    }

    /// Returns the model type
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Returns the rates of change dy/dt at (t, y)
    pub fn rates(&self, t: f64, state: &[f64]) -> Result<Vec<f64>, StrError> {
        let ndim = self.actual.ndim();
        if state.len() != ndim {
            return Err("the state vector has an incorrect dimension");
        }
        let y = Vector::from(&state.to_vec());
        let mut f = Vector::new(ndim);
        self.actual.calc_f(&mut f, t, &y)?;
        Ok(f.as_data().clone())
    }

    /// Integrates the model over the time grid
    ///
    /// The grid must have at least two points and be strictly increasing.
    /// The solver runs adaptively between consecutive grid points, thus the
    /// output is sampled exactly at the grid points. A state that becomes
    /// infinite or NaN stops the integration with an error.
    pub fn simulate(&mut self, x0: f64, tt: &[f64]) -> Result<Trajectory, StrError> {
        let npoint = tt.len();
        if npoint < 2 {
            return Err("the time grid must have at least two points");
        }

        // initial values
        let mut y = Vector::from(&self.actual.initial_state(x0));
        let tracks_substrate = y.dim() > 1;
        let mut biomass = vec![0.0; npoint];
        let mut substrate = vec![0.0; if tracks_substrate { npoint } else { 0 }];
        biomass[0] = y[0];
        if tracks_substrate {
            substrate[0] = y[1];
        }

        tracing::debug!(
            model = self.model_type.name(),
            npoint,
            t_final = tt[npoint - 1],
            "integrating growth model"
        );

        for k in 1..npoint {
            let t0 = tt[k - 1];
            let t1 = tt[k];
            if t1 <= t0 {
                return Err("the time grid must be strictly increasing");
            }
            self.ode_solver.solve(&mut y, t0, t1, None, &mut self.actual)?;
            biomass[k] = y[0];
            if tracks_substrate {
                substrate[k] = y[1];
            }
        }

        Ok(Trajectory {
            time: tt.to_vec(),
            biomass,
            substrate: if tracks_substrate { Some(substrate) } else { None },
        })
    }

    /// Calculates the growth metrics of a simulated trajectory
    pub fn metrics(&self, x0: f64, trajectory: &Trajectory, formula: GrowthRateFormula) -> GrowthMetrics {
        self.actual.calc_metrics(x0, &trajectory.final_state(), formula)
    }
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use russell_lab::approx_eq;

    fn monod_params() -> HashMap<&'static str, f64> {
        HashMap::from([("umax", 0.5), ("yxs", 0.5), ("s0", 10.0), ("ks", 1.0)])
    }

    #[test]
    fn new_captures_errors() {
        let params = HashMap::from([("umax", 0.5)]);
        assert_eq!(
            Model::new(ModelType::Monod, params, Method::DoPri5).err(),
            Some("Parameter 'yxs' not found")
        );
        let params = HashMap::from([("c", 9.0), ("m", 5.0)]);
        assert_eq!(
            Model::new(ModelType::Gompertz, params, Method::DoPri5).err(),
            Some("Parameter 'b' not found")
        );
    }

    #[test]
    fn rates_work() {
        let model = Model::new(ModelType::Monod, monod_params(), Method::DoPri5).unwrap();
        assert_eq!(model.model_type(), ModelType::Monod);
        let f = model.rates(0.0, &[0.1, 10.0]).unwrap();
        approx_eq(f[0], 0.1 * 0.5 * 10.0 / 11.0, 1e-15);
        approx_eq(f[1], -2.0 * f[0], 1e-15);
        assert_eq!(
            model.rates(0.0, &[0.1]).err(),
            Some("the state vector has an incorrect dimension")
        );
    }

    #[test]
    fn simulate_captures_grid_errors() {
        let mut model = Model::new(ModelType::Monod, monod_params(), Method::DoPri5).unwrap();
        assert_eq!(
            model.simulate(0.1, &[0.0]).err(),
            Some("the time grid must have at least two points")
        );
        assert_eq!(
            model.simulate(0.1, &[0.0, 1.0, 1.0]).err(),
            Some("the time grid must be strictly increasing")
        );
    }

    #[test]
    fn simulate_keeps_the_initial_state() {
        let mut model = Model::new(ModelType::Monod, monod_params(), Method::DoPri5).unwrap();
        let tt = [0.0, 0.5, 1.0, 2.0];
        let trajectory = model.simulate(0.1, &tt).unwrap();
        assert_eq!(trajectory.time, tt);
        assert_eq!(trajectory.biomass.len(), 4);
        assert_eq!(trajectory.biomass[0], 0.1);
        let substrate = trajectory.substrate.as_ref().unwrap();
        assert_eq!(substrate.len(), 4);
        assert_eq!(substrate[0], 10.0);
        assert_eq!(trajectory.final_state().len(), 2);
    }

    #[test]
    fn simulate_propagates_domain_errors() {
        // S0 = -Ks makes the saturation term undefined at t = 0
        let params = HashMap::from([("umax", 0.5), ("yxs", 0.5), ("s0", -1.0), ("ks", 1.0)]);
        let mut model = Model::new(ModelType::Monod, params, Method::DoPri5).unwrap();
        assert!(model.simulate(0.1, &[0.0, 1.0]).is_err());
    }

    #[test]
    fn simulate_rejects_non_finite_rates() {
        // Yxs = 0 makes dS/dt infinite
        let params = HashMap::from([("umax", 0.5), ("yxs", 0.0), ("s0", 10.0), ("ks", 1.0)]);
        let mut model = Model::new(ModelType::Monod, params, Method::DoPri5).unwrap();
        assert!(model.rates(0.0, &[0.1, 10.0]).unwrap()[1].is_infinite());
        assert!(model.simulate(0.1, &[0.0, 1.0]).is_err());
    }

    #[test]
    fn simulate_is_deterministic() {
        let params = HashMap::from([("c", 9.0), ("m", 5.0), ("b", 1.0)]);
        let tt = [0.0, 2.0, 4.0, 6.0, 8.0];
        let mut model_a = Model::new(ModelType::Gompertz, params.clone(), Method::DoPri5).unwrap();
        let mut model_b = Model::new(ModelType::Gompertz, params, Method::DoPri5).unwrap();
        let a = model_a.simulate(0.1, &tt).unwrap();
        let b = model_b.simulate(0.1, &tt).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.substrate, None);
        assert_eq!(a.final_state().len(), 1);
    }
}
