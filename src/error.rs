use crate::StrError;
use thiserror::Error;

/// Errors reported by the simulation pipeline and the command-line front end
#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("{0}")]
    InvalidSelection(StrError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(StrError),

    #[error("Simulation failed: {0}")]
    Simulation(StrError),

    #[error("Plotting failed: {0}")]
    Plot(StrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrowthError {
    /// Returns the process exit code associated with the error
    pub fn exit_code(&self) -> u8 {
        match self {
            GrowthError::InvalidSelection(_) | GrowthError::InvalidSettings(_) => 2,
            GrowthError::Simulation(_) => 3,
            GrowthError::Plot(_) => 4,
            GrowthError::Io(_) => 5,
        }
    }
}

/// Result type of the simulation pipeline
pub type GrowthResult<T> = Result<T, GrowthError>;
