//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or driving a simulation.
///
/// The integrator step itself is a total function of finite inputs; errors
/// can only arise at construction and reconfiguration time.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
