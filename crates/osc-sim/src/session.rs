//! Simulation session: state ownership and run/reset lifecycle.

use crate::error::{SimError, SimResult};
use crate::history::TrailHistory;
use crate::model::OscillatorModel;

/// Fixed integration step used by frame-driven sessions (s).
///
/// The step is never derived from the wall clock; frame-rate jitter does
/// not change the trajectory.
pub const FRAME_DT_S: f64 = 0.016;

/// A running simulation of one oscillator.
///
/// The session owns the state vector exclusively: it is mutated only by
/// `tick` and `reset`. Parameters are read by the integrator, never
/// written; swapping them mid-run takes effect on the next step without
/// touching state.
///
/// The external clock (animation frame, headless loop) calls `tick` once
/// per frame and reads one `snapshot` after it. `tick` is gated on the
/// running flag, so pausing guarantees no further step regardless of any
/// still-scheduled frame callback.
pub struct Session<M: OscillatorModel> {
    params: M,
    state: M::State,
    dt_s: f64,
    running: bool,
    trail: TrailHistory,
}

/// Read-only view of a session published once per frame.
#[derive(Clone)]
pub struct Snapshot<M: OscillatorModel> {
    pub state: M::State,
    pub observables: M::Observables,
    pub running: bool,
    /// Recent trail coordinates, oldest first.
    pub trail: Vec<f64>,
}

impl<M: OscillatorModel> Session<M> {
    /// Create an idle session with state seeded from the initial-condition
    /// parameters.
    ///
    /// # Errors
    /// Returns error if the parameters are degenerate or dt is not
    /// positive.
    pub fn new(params: M, dt_s: f64) -> SimResult<Self> {
        params.validate()?;
        if dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt_s must be positive",
            });
        }
        let state = params.initial_state();
        Ok(Self {
            params,
            state,
            dt_s,
            running: false,
            trail: TrailHistory::new(),
        })
    }

    /// Create an idle session stepping at [`FRAME_DT_S`].
    pub fn with_frame_step(params: M) -> SimResult<Self> {
        Self::new(params, FRAME_DT_S)
    }

    pub fn params(&self) -> &M {
        &self.params
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed simulation time of the current state (s).
    pub fn time_s(&self) -> f64 {
        M::time_s(&self.state)
    }

    /// Swap parameters without touching state; effective on the next step.
    ///
    /// # Errors
    /// Returns error and keeps the old parameters if the new ones are
    /// degenerate.
    pub fn set_params(&mut self, params: M) -> SimResult<()> {
        params.validate()?;
        self.params = params;
        tracing::debug!("session parameters updated");
        Ok(())
    }

    pub fn start(&mut self) {
        if !self.running {
            tracing::debug!(t_s = self.time_s(), "session started");
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        if self.running {
            tracing::debug!(t_s = self.time_s(), "session paused");
        }
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and reinitialize state from the current initial-condition
    /// parameters; clears the trail. Idempotent.
    pub fn reset(&mut self) {
        self.running = false;
        self.state = self.params.initial_state();
        self.trail.clear();
        tracing::debug!("session reset");
    }

    /// Advance one fixed step if running, recording a trail sample.
    ///
    /// Returns whether a step occurred. Frozen (paused) state stays
    /// renderable through `snapshot`.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.state = self.params.step(&self.state, self.dt_s);
        self.trail.push(M::trail_coordinate(&self.state));
        true
    }

    /// Publish a read-only snapshot of state plus derived quantities.
    pub fn snapshot(&self) -> Snapshot<M> {
        Snapshot {
            state: self.state.clone(),
            observables: self.params.observables(),
            running: self.running,
            trail: self.trail.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendulum::PendulumParams;
    use crate::spring_mass::SpringMassParams;

    #[test]
    fn new_session_is_idle_at_t0() {
        let session = Session::with_frame_step(PendulumParams::default()).unwrap();
        assert!(!session.is_running());
        assert_eq!(session.time_s(), 0.0);
        assert!(session.snapshot().trail.is_empty());
    }

    #[test]
    fn new_rejects_bad_dt() {
        let result = Session::new(PendulumParams::default(), 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn tick_is_gated_on_running() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();

        assert!(!session.tick());
        assert_eq!(session.time_s(), 0.0);

        session.start();
        assert!(session.tick());
        assert_eq!(session.time_s(), FRAME_DT_S);

        session.pause();
        assert!(!session.tick());
        assert_eq!(session.time_s(), FRAME_DT_S);
    }

    #[test]
    fn set_params_keeps_state() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        session.start();
        for _ in 0..10 {
            session.tick();
        }
        let before = session.state().clone();

        let mut stiffer = session.params().clone();
        stiffer.stiffness_n_per_m = 40.0;
        session.set_params(stiffer).unwrap();

        assert_eq!(session.state(), &before);
        assert!(session.is_running());
    }

    #[test]
    fn set_params_rejects_degenerate_and_keeps_old() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        let mut bad = session.params().clone();
        bad.mass_kg = 0.0;

        assert!(session.set_params(bad).is_err());
        assert_eq!(session.params().mass_kg, 1.0);
    }

    #[test]
    fn reset_reseeds_from_current_parameters() {
        let mut session = Session::with_frame_step(PendulumParams::default()).unwrap();
        session.start();
        for _ in 0..20 {
            session.tick();
        }

        let mut swung = session.params().clone();
        swung.theta0_rad = -1.0;
        session.set_params(swung).unwrap();
        session.reset();

        assert!(!session.is_running());
        assert_eq!(session.state().theta_rad, -1.0);
        assert_eq!(session.state().t_s, 0.0);
        assert!(session.snapshot().trail.is_empty());
    }

    #[test]
    fn trail_records_per_tick() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        session.start();
        let mut expected = Vec::new();
        for _ in 0..5 {
            session.tick();
            expected.push(session.state().x_m);
        }
        assert_eq!(session.snapshot().trail, expected);
    }
}
