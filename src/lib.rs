pub type StrError = &'static str;

pub mod cli;
pub mod enums;
pub mod error;
mod gompertz;
pub mod metrics;
pub mod model;
mod model_trait;
mod monod;
pub mod pipeline;
pub mod plot;
pub mod report;

pub use enums::*;
pub use error::*;
pub use gompertz::*;
pub use metrics::*;
pub use model::*;
use model_trait::*;
pub use monod::*;
