//! Text rendering of the growth metrics

use crate::{GrowthMetrics, ModelType};

/// Formats the three metrics of a run, one per line
pub fn format_metrics(model_type: ModelType, metrics: &GrowthMetrics) -> String {
    let name = model_type.name();
    format!(
        "{name} Growth Rate: {:?}\n{name} Latency Duration: {:?} hours\n{name} Max Population Density: {:?}\n",
        metrics.growth_rate, metrics.latency_duration, metrics.max_population_density
    )
}

// tests /////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
