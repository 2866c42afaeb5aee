//! Headless run loop and result recording.
//!
//! A deterministic stand-in for the animation-frame clock: tick the
//! session at its fixed step until the end time, recording decimated
//! snapshots of the state.

use crate::error::{SimError, SimResult};
use crate::model::OscillatorModel;
use crate::session::Session;

/// Options for headless runs.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Final simulation time (seconds)
    pub t_end_s: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            t_end_s: 10.0,
            max_steps: 100_000,
            record_every: 1,
        }
    }
}

/// Record of a headless run.
#[derive(Clone, Debug)]
pub struct RunRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub states: Vec<S>,
}

impl<S> RunRecord<S> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Drive a session to `t_end_s`, recording decimated state snapshots.
///
/// The session is started, ticked once per loop iteration, and paused at
/// the end; the initial and final states are always recorded.
pub fn run_session<M: OscillatorModel>(
    session: &mut Session<M>,
    opts: &RunOptions,
) -> SimResult<RunRecord<M::State>> {
    if opts.t_end_s < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end_s must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut t_record = vec![session.time_s()];
    let mut state_record = vec![session.state().clone()];

    session.start();

    let mut step = 0;
    while session.time_s() < opts.t_end_s && step < opts.max_steps {
        session.tick();
        step += 1;

        if step % opts.record_every == 0 {
            t_record.push(session.time_s());
            state_record.push(session.state().clone());
        }
    }

    session.pause();

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(session.time_s());
        state_record.push(session.state().clone());
    }

    tracing::debug!(steps = step, samples = t_record.len(), "run complete");

    Ok(RunRecord {
        t: t_record,
        states: state_record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FRAME_DT_S;
    use crate::spring_mass::SpringMassParams;

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.t_end_s, 10.0);
        assert_eq!(opts.max_steps, 100_000);
        assert_eq!(opts.record_every, 1);
    }

    #[test]
    fn run_records_initial_and_final() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        let opts = RunOptions {
            t_end_s: 1.0,
            max_steps: 100_000,
            record_every: 1,
        };
        let record = run_session(&mut session, &opts).unwrap();

        assert_eq!(record.t[0], 0.0);
        assert!(*record.t.last().unwrap() >= 1.0);
        assert_eq!(record.t.len(), record.states.len());
        assert!(!session.is_running());
    }

    #[test]
    fn run_decimation_still_records_final() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        let opts = RunOptions {
            t_end_s: 0.1,
            max_steps: 100_000,
            record_every: 4,
        };
        // 0.1 / 0.016 -> 7 steps; 7 % 4 != 0, so the final state is
        // appended outside the decimation grid.
        let record = run_session(&mut session, &opts).unwrap();
        let last_t = *record.t.last().unwrap();
        assert!((last_t - 7.0 * FRAME_DT_S).abs() < 1e-12);
    }

    #[test]
    fn run_rejects_bad_options() {
        let mut session = Session::with_frame_step(SpringMassParams::default()).unwrap();
        assert!(
            run_session(
                &mut session,
                &RunOptions {
                    t_end_s: -1.0,
                    ..RunOptions::default()
                }
            )
            .is_err()
        );
        assert!(
            run_session(
                &mut session,
                &RunOptions {
                    max_steps: 0,
                    ..RunOptions::default()
                }
            )
            .is_err()
        );
        assert!(
            run_session(
                &mut session,
                &RunOptions {
                    record_every: 0,
                    ..RunOptions::default()
                }
            )
            .is_err()
        );
    }
}
