// Unified error handling for the trade cost simulator

use crate::config::ConfigError;

/// Main error type for the simulator
///
/// Estimation itself never fails (degenerate inputs produce "not
/// applicable" fields); errors here come from the surrounding layers:
/// configuration, generated-book validation, and report output.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid order book: {0}")]
    InvalidBook(String),

    #[error("Invalid parameter '{0}': {1}")]
    InvalidParameter(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

impl SimulatorError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SimulatorError::Config(_) => "config",
            SimulatorError::InvalidBook(_) => "book",
            SimulatorError::InvalidParameter(_, _) => "validation",
            SimulatorError::Io(_) => "io",
            SimulatorError::Report(_) => "report",
        }
    }
}

/// Result type alias using SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
