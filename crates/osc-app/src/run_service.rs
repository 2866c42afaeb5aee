//! Headless run execution.

use crate::error::AppResult;
use crate::scenario::{Scenario, SystemParams, validate_scenario};
use osc_sim::{
    FRAME_DT_S, OscillatorModel, PendulumObservables, PendulumState, RunOptions, RunRecord,
    Session, SpringMassObservables, SpringMassState, run_session,
};
use std::io::Write;

/// Request to execute a headless run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub scenario: Scenario,
    /// Fixed integration step (seconds)
    pub dt_s: f64,
    /// Final simulation time (seconds)
    pub t_end_s: f64,
    /// Record every N-th step
    pub record_every: usize,
}

impl RunRequest {
    /// Run a scenario at the frame step for 10 seconds.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            dt_s: FRAME_DT_S,
            t_end_s: 10.0,
            record_every: 1,
        }
    }
}

/// Recorded time series plus derived quantities, per system.
pub enum RunOutcome {
    Pendulum {
        record: RunRecord<PendulumState>,
        observables: PendulumObservables,
    },
    SpringMass {
        record: RunRecord<SpringMassState>,
        observables: SpringMassObservables,
    },
}

/// Concise execution summary for a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub scenario: String,
    pub system: &'static str,
    pub dt_s: f64,
    pub steps: usize,
    pub samples: usize,
    pub final_time_s: f64,
}

/// Validate and execute a run request.
pub fn execute_run(request: &RunRequest) -> AppResult<(RunOutcome, RunSummary)> {
    validate_scenario(&request.scenario)?;

    let opts = RunOptions {
        t_end_s: request.t_end_s,
        record_every: request.record_every,
        ..RunOptions::default()
    };

    let outcome = match &request.scenario.system {
        SystemParams::Pendulum(params) => {
            let mut session = Session::new(params.clone(), request.dt_s)?;
            let record = run_session(&mut session, &opts)?;
            RunOutcome::Pendulum {
                observables: session.params().observables(),
                record,
            }
        }
        SystemParams::SpringMass(params) => {
            let mut session = Session::new(params.clone(), request.dt_s)?;
            let record = run_session(&mut session, &opts)?;
            RunOutcome::SpringMass {
                observables: session.params().observables(),
                record,
            }
        }
    };

    let (samples, final_time_s) = match &outcome {
        RunOutcome::Pendulum { record, .. } => (record.len(), *record.t.last().unwrap_or(&0.0)),
        RunOutcome::SpringMass { record, .. } => (record.len(), *record.t.last().unwrap_or(&0.0)),
    };

    let summary = RunSummary {
        scenario: request.scenario.name.clone(),
        system: request.scenario.system.label(),
        dt_s: request.dt_s,
        steps: (final_time_s / request.dt_s).round() as usize,
        samples,
        final_time_s,
    };

    tracing::debug!(
        scenario = %summary.scenario,
        steps = summary.steps,
        "headless run finished"
    );

    Ok((outcome, summary))
}

/// Write the recorded time series as CSV.
pub fn write_series_csv(outcome: &RunOutcome, out: &mut impl Write) -> std::io::Result<()> {
    match outcome {
        RunOutcome::Pendulum { record, .. } => {
            writeln!(out, "t_s,theta_rad,omega_rad_s")?;
            for (t, state) in record.t.iter().zip(&record.states) {
                writeln!(out, "{},{},{}", t, state.theta_rad, state.omega_rad_s)?;
            }
        }
        RunOutcome::SpringMass { record, .. } => {
            writeln!(out, "t_s,x_m,v_m_s,energy_j")?;
            for (t, state) in record.t.iter().zip(&record.states) {
                writeln!(
                    out,
                    "{},{},{},{}",
                    t, state.x_m, state.v_m_s, state.energy_j
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{builtin_scenarios, find_scenario};

    #[test]
    fn execute_builtin_pendulum() {
        let scenarios = builtin_scenarios();
        let scenario = find_scenario(&scenarios, "pendulum").unwrap().clone();
        let request = RunRequest {
            t_end_s: 1.0,
            ..RunRequest::new(scenario)
        };

        let (outcome, summary) = execute_run(&request).unwrap();
        assert_eq!(summary.system, "pendulum");
        assert!(summary.final_time_s >= 1.0);
        assert_eq!(summary.samples, summary.steps + 1);
        match outcome {
            RunOutcome::Pendulum { record, observables } => {
                assert_eq!(record.t.len(), record.states.len());
                assert!((observables.natural_frequency_rad_s - 3.1321).abs() < 1e-4);
            }
            _ => panic!("expected pendulum outcome"),
        }
    }

    #[test]
    fn csv_has_header_and_all_samples() {
        let scenarios = builtin_scenarios();
        let scenario = find_scenario(&scenarios, "spring").unwrap().clone();
        let request = RunRequest {
            t_end_s: 0.5,
            ..RunRequest::new(scenario)
        };

        let (outcome, summary) = execute_run(&request).unwrap();
        let mut buf = Vec::new();
        write_series_csv(&outcome, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t_s,x_m,v_m_s,energy_j");
        assert_eq!(lines.len(), summary.samples + 1);
    }

    #[test]
    fn out_of_range_scenario_is_refused() {
        let mut scenario = builtin_scenarios().remove(0);
        match &mut scenario.system {
            SystemParams::Pendulum(p) => p.length_m = 10.0,
            _ => unreachable!(),
        }
        assert!(execute_run(&RunRequest::new(scenario)).is_err());
    }
}
