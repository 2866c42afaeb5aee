//! Damped pendulum dynamics.

use crate::error::{SimError, SimResult};
use crate::model::OscillatorModel;
use osc_core::ParamRange;
use osc_core::units::constants::G_MPS2;
use serde::{Deserialize, Serialize};

/// State of the pendulum.
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumState {
    /// Angle from vertical (rad)
    pub theta_rad: f64,
    /// Angular velocity (rad/s)
    pub omega_rad_s: f64,
    /// Elapsed simulation time (s)
    pub t_s: f64,
}

/// Damped pendulum (nonlinear, undriven).
///
/// Equation of motion:
///
/// ```text
/// α = -(g / L)·sin(θ) - c·ω
/// ```
///
/// Fixed-step update, explicit Euler:
///
/// ```text
/// ω' = ω + α·dt
/// θ' = θ + ω·dt      (pre-update ω)
/// t' = t + dt
/// ```
///
/// The angle advances with the pre-update angular velocity. The spring-mass
/// model uses the post-update velocity instead; the two orderings are part
/// of each model's contract and are pinned by tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumParams {
    /// Pendulum length (m), must be positive
    pub length_m: f64,
    /// Initial angle from vertical (rad)
    pub theta0_rad: f64,
    /// Viscous damping coefficient on angular velocity (1/s), >= 0
    pub damping: f64,
    /// Gravitational acceleration (m/s²), must be positive
    #[serde(default = "default_gravity")]
    pub gravity_m_s2: f64,
}

fn default_gravity() -> f64 {
    G_MPS2
}

impl PendulumParams {
    /// Slider range for length (m).
    pub const LENGTH_RANGE: ParamRange = ParamRange::new(0.5, 2.0);
    /// Slider range for initial angle (rad).
    pub const THETA0_RANGE: ParamRange = ParamRange::new(-1.5, 1.5);
    /// Slider range for damping (1/s).
    pub const DAMPING_RANGE: ParamRange = ParamRange::new(0.0, 1.0);

    /// Create pendulum parameters with standard gravity.
    ///
    /// # Errors
    /// Returns error if length is not positive or damping is negative.
    pub fn new(length_m: f64, theta0_rad: f64, damping: f64) -> SimResult<Self> {
        let params = Self {
            length_m,
            theta0_rad,
            damping,
            gravity_m_s2: G_MPS2,
        };
        params.validate()?;
        Ok(params)
    }

    /// Natural angular frequency of undamped free oscillation (rad/s).
    ///
    /// ```text
    /// ω_n = sqrt(g / L)
    /// ```
    pub fn natural_frequency_rad_s(&self) -> f64 {
        (self.gravity_m_s2 / self.length_m).sqrt()
    }

    /// Small-angle period (s): T = 2π/ω_n.
    pub fn period_s(&self) -> f64 {
        std::f64::consts::TAU / self.natural_frequency_rad_s()
    }

    /// Angular acceleration dω/dt (rad/s²) at the given state.
    pub fn angular_acceleration(&self, theta_rad: f64, omega_rad_s: f64) -> f64 {
        -(self.gravity_m_s2 / self.length_m) * theta_rad.sin() - self.damping * omega_rad_s
    }
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            length_m: 1.0,
            theta0_rad: 0.3,
            damping: 0.1,
            gravity_m_s2: G_MPS2,
        }
    }
}

/// Derived quantities of the pendulum, pure functions of parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumObservables {
    /// Natural angular frequency ω_n (rad/s)
    pub natural_frequency_rad_s: f64,
    /// Small-angle period T (s)
    pub period_s: f64,
}

impl OscillatorModel for PendulumParams {
    type State = PendulumState;
    type Observables = PendulumObservables;

    fn validate(&self) -> SimResult<()> {
        if self.length_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "pendulum length must be positive",
            });
        }
        if self.gravity_m_s2 <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "gravity must be positive",
            });
        }
        if self.damping < 0.0 {
            return Err(SimError::InvalidArg {
                what: "damping cannot be negative",
            });
        }
        Ok(())
    }

    fn initial_state(&self) -> PendulumState {
        PendulumState {
            theta_rad: self.theta0_rad,
            omega_rad_s: 0.0,
            t_s: 0.0,
        }
    }

    fn step(&self, state: &PendulumState, dt_s: f64) -> PendulumState {
        let alpha = self.angular_acceleration(state.theta_rad, state.omega_rad_s);
        let omega_new = state.omega_rad_s + alpha * dt_s;
        // Pre-update angular velocity; ordering is part of the contract.
        let theta_new = state.theta_rad + state.omega_rad_s * dt_s;

        PendulumState {
            theta_rad: theta_new,
            omega_rad_s: omega_new,
            t_s: state.t_s + dt_s,
        }
    }

    fn observables(&self) -> PendulumObservables {
        PendulumObservables {
            natural_frequency_rad_s: self.natural_frequency_rad_s(),
            period_s: self.period_s(),
        }
    }

    fn trail_coordinate(state: &PendulumState) -> f64 {
        state.theta_rad
    }

    fn time_s(state: &PendulumState) -> f64 {
        state.t_s
    }
}
