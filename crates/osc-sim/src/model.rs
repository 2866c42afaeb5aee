//! OscillatorModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for second-order oscillator models driven at a fixed time step.
///
/// Implemented by the parameter struct of each system: the parameters are
/// the model, and `step` is a pure function of (parameters, state, dt).
/// Parameters are never mutated by the integrator; swapping them between
/// steps takes effect on the next step without touching state.
pub trait OscillatorModel: Clone {
    /// Evolving physical state (must be Clone, for snapshots).
    type State: Clone;

    /// Derived quantities computed from parameters alone.
    type Observables: Clone + PartialEq;

    /// Check parameters for degenerate values (zero mass, zero length)
    /// before they reach the integrator.
    fn validate(&self) -> SimResult<()>;

    /// Build the state at t = 0 from the current initial-condition
    /// parameters. Called at session creation and on every reset.
    fn initial_state(&self) -> Self::State;

    /// Advance state by one fixed step. Total for finite in-range inputs;
    /// each model documents its own update ordering.
    fn step(&self, state: &Self::State, dt_s: f64) -> Self::State;

    /// Compute the derived quantities for the current parameters.
    fn observables(&self) -> Self::Observables;

    /// Primary coordinate retained in the trail history.
    fn trail_coordinate(state: &Self::State) -> f64;

    /// Elapsed simulation time of a state.
    fn time_s(state: &Self::State) -> f64;
}
