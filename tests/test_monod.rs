use microbial_growth::pipeline::{SimulationRequest, SimulationSettings, run_simulation};
use microbial_growth::{GrowthRateFormula, Model, ModelType, OdeMethod};
use plotpy::{Curve, Plot, linspace};
use russell_lab::approx_eq;
use russell_ode::Method;
use std::collections::HashMap;

const SAVE_FIGURE: bool = false;

const UMAX: f64 = 0.5;
const YXS: f64 = 0.5;
const S0: f64 = 10.0;
const KS: f64 = 1.0;
const X0: f64 = 0.1;

fn params(s0: f64) -> HashMap<&'static str, f64> {
    HashMap::from([("umax", UMAX), ("yxs", YXS), ("s0", s0), ("ks", KS)])
}

#[test]
fn test_monod_batch_culture() {
    // Allocate the model
    let method = Method::DoPri5;
    let mut model = Model::new(ModelType::Monod, params(S0), method).unwrap();

    // 24 hours, 1000 points
    let tt = linspace(0.0, 24.0, 1000);
    let trajectory = model.simulate(X0, &tt).unwrap();
    let xx = &trajectory.biomass;
    let ss = trajectory.substrate.as_ref().unwrap();

    // Generate the plot
    if SAVE_FIGURE {
        let mut curve_x = Curve::new();
        curve_x.set_label("Biomass (X)").draw(&tt, xx);
        let mut curve_s = Curve::new();
        curve_s
            .set_label("Substrate (S)")
            .set_line_style("--")
            .draw(&tt, ss);
        let mut plot = Plot::new();
        plot.add(&curve_x)
            .add(&curve_s)
            .grid_labels_legend("Time (hours)", "Concentration")
            .set_figure_size_points(600.0, 400.0)
            .save("/tmp/microbial_growth/test_monod_batch_culture.svg")
            .unwrap();
    }

    // Check the sizes and the initial state
    assert_eq!(xx.len(), 1000);
    assert_eq!(ss.len(), 1000);
    assert_eq!(xx[0], X0);
    assert_eq!(ss[0], S0);

    // Biomass grows and substrate depletes
    for k in 1..tt.len() {
        assert!(xx[k] >= xx[k - 1] - 1e-9, "biomass decreased at t = {}", tt[k]);
        assert!(ss[k] <= ss[k - 1] + 1e-9, "substrate increased at t = {}", tt[k]);
        assert!(ss[k] >= -1e-6, "substrate became negative at t = {}", tt[k]);
    }

    // Mass balance: X + Yxs S is conserved
    let total = X0 + YXS * S0;
    for k in 0..tt.len() {
        approx_eq(xx[k] + YXS * ss[k], total, 1e-5);
    }

    // Substrate is exhausted after 24 hours
    approx_eq(ss[999], 0.0, 1e-4);
    approx_eq(xx[999], total, 1e-4);
}

#[test]
fn test_monod_without_substrate() {
    let mut model = Model::new(ModelType::Monod, params(0.0), Method::DoPri5).unwrap();
    let tt = linspace(0.0, 24.0, 101);
    let trajectory = model.simulate(X0, &tt).unwrap();
    let ss = trajectory.substrate.as_ref().unwrap();
    for k in 0..tt.len() {
        assert_eq!(trajectory.biomass[k], X0);
        assert_eq!(ss[k], 0.0);
    }
    for t in [0.0, 12.0, 24.0] {
        let f = model.rates(t, &[X0, 0.0]).unwrap();
        assert_eq!(f, vec![0.0, 0.0]);
    }
}

#[test]
fn test_monod_coarse_and_fine_grids_agree() {
    let tt_coarse = linspace(0.0, 24.0, 13);
    let tt_fine = linspace(0.0, 24.0, 121);

    let mut model = Model::new(ModelType::Monod, params(S0), Method::DoPri5).unwrap();
    let coarse = model.simulate(X0, &tt_coarse).unwrap();
    let fine = model.simulate(X0, &tt_fine).unwrap();

    // every 10th point of the fine grid is a point of the coarse grid
    for i in 0..tt_coarse.len() {
        approx_eq(fine.time[10 * i], coarse.time[i], 1e-12);
        approx_eq(fine.biomass[10 * i], coarse.biomass[i], 1e-5);
        approx_eq(
            fine.substrate.as_ref().unwrap()[10 * i],
            coarse.substrate.as_ref().unwrap()[i],
            1e-5,
        );
    }
}

#[test]
fn test_monod_stiff_method_agrees() {
    let tt = linspace(0.0, 24.0, 49);
    let mut explicit = Model::new(ModelType::Monod, params(S0), Method::DoPri5).unwrap();
    let mut implicit = Model::new(ModelType::Monod, params(S0), Method::Radau5).unwrap();
    let a = explicit.simulate(X0, &tt).unwrap();
    let b = implicit.simulate(X0, &tt).unwrap();
    for k in 0..tt.len() {
        approx_eq(a.biomass[k], b.biomass[k], 1e-4);
    }
}

#[test]
fn test_monod_metrics() {
    let request = SimulationRequest::monod(UMAX, YXS, S0, KS, X0, 24.0);

    let literal = run_simulation(&request, &SimulationSettings::default()).unwrap();
    assert_eq!(literal.metrics.growth_rate, 1.0);
    assert_eq!(literal.metrics.latency_duration, 0.0);
    approx_eq(literal.metrics.max_population_density, 1.12, 1e-15);

    let settings = SimulationSettings {
        method: OdeMethod::DoPri8,
        growth_rate_formula: GrowthRateFormula::Specific,
        ..Default::default()
    };
    let specific = run_simulation(&request, &settings).unwrap();
    approx_eq(specific.metrics.growth_rate, UMAX * S0 / (KS + S0), 1e-15);
    assert_eq!(
        specific.metrics.max_population_density,
        literal.metrics.max_population_density
    );

    // same inputs, bit-identical outputs
    let again = run_simulation(&request, &SimulationSettings::default()).unwrap();
    assert_eq!(again.metrics, literal.metrics);
    assert_eq!(again.trajectory, literal.trajectory);
}
