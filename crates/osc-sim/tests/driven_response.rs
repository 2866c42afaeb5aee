//! Integration test: damping regimes and harmonic forcing.
//!
//! Covers:
//! - critical damping boundary (exact ζ = 1 classification)
//! - non-oscillatory return of the critically damped oscillator
//! - amplified response when driven at the natural frequency
//! - forcing phase anchored at the pre-update time
//! - trail history FIFO semantics through the session

use osc_sim::{
    DampingClass, OscillatorModel, RunOptions, Session, SpringMassParams, TRAIL_CAPACITY,
    run_session,
};
use proptest::prelude::*;

#[test]
fn critical_damping_boundary() {
    let m: f64 = 2.0;
    let k: f64 = 18.0;
    let c = 2.0 * (k * m).sqrt();
    let params = SpringMassParams::new(m, k, c, 0.1).unwrap();

    let obs = params.observables();
    assert_eq!(obs.damping_ratio, 1.0);
    assert_eq!(obs.damping_class, DampingClass::CriticallyDamped);
    assert_eq!(obs.damped_frequency_rad_s, 0.0);
}

#[test]
fn critically_damped_return_does_not_oscillate() {
    let m: f64 = 1.0;
    let k: f64 = 10.0;
    let c = 2.0 * (k * m).sqrt();
    let params = SpringMassParams::new(m, k, c, 0.1).unwrap();

    let mut session = Session::with_frame_step(params).unwrap();
    let record = run_session(&mut session, &RunOptions::default()).unwrap();

    // Released from rest at x0 > 0: the position decays to zero without
    // crossing it.
    for state in &record.states {
        assert!(state.x_m > -1e-3, "sign change at t={:.3}", state.t_s);
    }
    assert!(record.states.last().unwrap().x_m.abs() < 1e-3);
}

#[test]
fn resonant_forcing_amplifies_response() {
    let base = SpringMassParams::new(1.0, 10.0, 0.5, 0.0).unwrap();
    let omega_n = base.natural_frequency_rad_s();
    let params = base.with_forcing(5.0, omega_n).unwrap();
    assert!(params.near_resonance());

    let mut session = Session::with_frame_step(params).unwrap();
    let record = run_session(&mut session, &RunOptions::default()).unwrap();

    // Static deflection is A/k = 0.5 m; near resonance the lightly damped
    // response builds to several times that.
    let peak = record
        .states
        .iter()
        .map(|s| s.x_m.abs())
        .fold(0.0_f64, f64::max);
    assert!(peak > 1.0, "peak displacement {peak:.3} m");
}

#[test]
fn forcing_uses_pre_update_time() {
    // First tick from rest at x=0: the force contribution is exactly
    // A·cos(ω_f·0) = A, so v' = (A/m)·dt and x' = v'·dt.
    let params = SpringMassParams::new(1.0, 10.0, 0.5, 0.0)
        .unwrap()
        .with_forcing(4.0, 7.0)
        .unwrap();
    let mut session = Session::with_frame_step(params).unwrap();
    session.start();
    session.tick();

    let dt = session.dt_s();
    let state = session.state();
    assert_eq!(state.v_m_s.to_bits(), (4.0 * dt).to_bits());
    assert_eq!(state.x_m.to_bits(), (4.0 * dt * dt).to_bits());
}

#[test]
fn trail_keeps_the_latest_samples() {
    let params = SpringMassParams::default().with_forcing(2.0, 3.0).unwrap();
    let mut session = Session::with_frame_step(params).unwrap();
    session.start();

    let mut positions = Vec::new();
    for _ in 0..(TRAIL_CAPACITY + 70) {
        session.tick();
        positions.push(session.state().x_m);
    }

    let trail = session.snapshot().trail;
    assert_eq!(trail.len(), TRAIL_CAPACITY);
    assert_eq!(trail, positions[positions.len() - TRAIL_CAPACITY..]);
}

proptest! {
    #[test]
    fn constructed_critical_damping_classifies_exactly(
        m in 0.5_f64..3.0_f64,
        k in 1.0_f64..50.0_f64,
    ) {
        let c = 2.0 * (k * m).sqrt();
        if let Ok(params) = SpringMassParams::new(m, k, c, 0.1) {
            prop_assert_eq!(params.damping_ratio(), 1.0);
            prop_assert_eq!(params.damping_class(), DampingClass::CriticallyDamped);
        }
    }

    #[test]
    fn steps_stay_finite_for_in_range_parameters(
        m in 0.5_f64..3.0_f64,
        k in 1.0_f64..50.0_f64,
        c in 0.0_f64..5.0_f64,
        x0 in -0.3_f64..0.3_f64,
        amp in 0.0_f64..10.0_f64,
        omega in 0.1_f64..10.0_f64,
    ) {
        let params = SpringMassParams {
            mass_kg: m,
            stiffness_n_per_m: k,
            damping_n_s_per_m: c,
            x0_m: x0,
            force_amplitude_n: amp,
            force_omega_rad_s: omega,
        };
        prop_assert!(params.validate().is_ok());

        let mut state = params.initial_state();
        for _ in 0..200 {
            state = params.step(&state, 0.016);
        }
        prop_assert!(state.x_m.is_finite());
        prop_assert!(state.v_m_s.is_finite());
        prop_assert!(state.energy_j.is_finite());
    }
}
