//! Fixed-step oscillator simulation framework for oscillab.
//!
//! Provides:
//! - `OscillatorModel` trait for pluggable second-order dynamic systems
//! - Damped pendulum model (explicit Euler)
//! - Damped/driven spring-mass model (semi-implicit Euler variant)
//! - `Session` lifecycle: run/pause/reset around exclusively owned state
//! - Fixed-step headless runner with decimated recording

pub mod error;
pub mod history;
pub mod model;
pub mod pendulum;
pub mod runner;
pub mod session;
pub mod spring_mass;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use history::{TRAIL_CAPACITY, TrailHistory};
pub use model::OscillatorModel;
pub use pendulum::{PendulumObservables, PendulumParams, PendulumState};
pub use runner::{RunOptions, RunRecord, run_session};
pub use session::{FRAME_DT_S, Session, Snapshot};
pub use spring_mass::{DampingClass, SpringMassObservables, SpringMassParams, SpringMassState};
