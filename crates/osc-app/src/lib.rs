//! Shared application service layer for oscillab.
//!
//! This crate provides a unified interface for both CLI and GUI frontends,
//! centralizing scenario management, parameter-range validation, and
//! headless run execution.

pub mod error;
pub mod run_service;
pub mod scenario;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use run_service::{RunOutcome, RunRequest, RunSummary, execute_run, write_series_csv};
pub use scenario::{
    Scenario, SystemParams, builtin_scenarios, find_scenario, load_scenarios, validate_scenario,
};
