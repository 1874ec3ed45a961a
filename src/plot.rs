//! Figures of simulated trajectories

use crate::{ModelType, StrError, Trajectory};
use plotpy::{Curve, Plot};
use std::path::Path;

/// Draws the trajectory (biomass, and substrate if tracked) and saves the figure
///
/// The file extension selects the format (e.g. `.svg` or `.png`).
pub fn plot_trajectory(model_type: ModelType, trajectory: &Trajectory, path: &Path) -> Result<(), StrError> {
    let mut curve_x = Curve::new();
    curve_x
        .set_label("Biomass (X)")
        .draw(&trajectory.time, &trajectory.biomass);

    let mut plot = Plot::new();
    plot.add(&curve_x);

    if let Some(substrate) = &trajectory.substrate {
        let mut curve_s = Curve::new();
        curve_s
            .set_label("Substrate (S)")
            .set_line_style("--")
            .draw(&trajectory.time, substrate);
        plot.add(&curve_s);
    }

    plot.set_title(&format!("{} Model", model_type.name()))
        .grid_labels_legend("Time (hours)", "Concentration")
        .set_figure_size_points(600.0, 400.0)
        .save(path)
}
