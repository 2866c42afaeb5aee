//! Error types for the osc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for osc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<osc_sim::SimError> for AppError {
    fn from(err: osc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<osc_core::CoreError> for AppError {
    fn from(err: osc_core::CoreError) -> Self {
        AppError::Validation(err.to_string())
    }
}
