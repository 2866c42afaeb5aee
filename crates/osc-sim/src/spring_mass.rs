//! Damped, driven spring-mass oscillator dynamics.

use crate::error::{SimError, SimResult};
use crate::model::OscillatorModel;
use core::fmt;
use osc_core::ParamRange;
use serde::{Deserialize, Serialize};

/// Half-width of the frequency-ratio band flagged as near resonance.
pub const RESONANCE_BAND: f64 = 0.1;

/// State of the spring-mass oscillator.
///
/// `energy_j` is a derived field: it is recomputed from the current
/// position and velocity after every step, never integrated on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringMassState {
    /// Displacement from equilibrium (m)
    pub x_m: f64,
    /// Velocity (m/s)
    pub v_m_s: f64,
    /// Elapsed simulation time (s)
    pub t_s: f64,
    /// Instantaneous total mechanical energy ½mv² + ½kx² (J)
    pub energy_j: f64,
}

/// Damped spring-mass oscillator with harmonic forcing.
///
/// Equation of motion:
///
/// ```text
/// m·a = -k·x - c·v + A·cos(ω_f·t)
/// ```
///
/// Fixed-step update, semi-implicit Euler variant:
///
/// ```text
/// a  = (-k·x - c·v + A·cos(ω_f·t)) / m     (forcing at the pre-update t)
/// v' = v + a·dt
/// x' = x + v'·dt                            (post-update v)
/// t' = t + dt
/// E' = ½·m·v'² + ½·k·x'²
/// ```
///
/// The position advances with the post-update velocity, unlike the
/// pendulum model; the asymmetry is part of each model's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringMassParams {
    /// Mass (kg), must be positive
    pub mass_kg: f64,
    /// Spring constant (N/m), must be positive
    pub stiffness_n_per_m: f64,
    /// Viscous damping coefficient (N·s/m), >= 0
    pub damping_n_s_per_m: f64,
    /// Initial displacement (m)
    pub x0_m: f64,
    /// Forcing amplitude (N), >= 0
    #[serde(default)]
    pub force_amplitude_n: f64,
    /// Forcing angular frequency (rad/s), must be positive
    #[serde(default = "default_force_omega")]
    pub force_omega_rad_s: f64,
}

fn default_force_omega() -> f64 {
    3.0
}

impl SpringMassParams {
    /// Slider range for mass (kg).
    pub const MASS_RANGE: ParamRange = ParamRange::new(0.5, 3.0);
    /// Slider range for spring constant (N/m).
    pub const STIFFNESS_RANGE: ParamRange = ParamRange::new(1.0, 50.0);
    /// Slider range for damping (N·s/m).
    pub const DAMPING_RANGE: ParamRange = ParamRange::new(0.0, 5.0);
    /// Slider range for initial displacement (m).
    pub const X0_RANGE: ParamRange = ParamRange::new(-0.3, 0.3);
    /// Slider range for forcing amplitude (N).
    pub const FORCE_AMPLITUDE_RANGE: ParamRange = ParamRange::new(0.0, 10.0);
    /// Slider range for forcing angular frequency (rad/s).
    pub const FORCE_OMEGA_RANGE: ParamRange = ParamRange::new(0.1, 10.0);

    /// Create an unforced oscillator.
    ///
    /// # Errors
    /// Returns error if mass or stiffness is not positive, or damping is
    /// negative.
    pub fn new(mass_kg: f64, stiffness_n_per_m: f64, damping_n_s_per_m: f64, x0_m: f64) -> SimResult<Self> {
        let params = Self {
            mass_kg,
            stiffness_n_per_m,
            damping_n_s_per_m,
            x0_m,
            force_amplitude_n: 0.0,
            force_omega_rad_s: 1.0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Set harmonic forcing F(t) = A·cos(ω_f·t).
    pub fn with_forcing(mut self, amplitude_n: f64, omega_rad_s: f64) -> SimResult<Self> {
        self.force_amplitude_n = amplitude_n;
        self.force_omega_rad_s = omega_rad_s;
        self.validate()?;
        Ok(self)
    }

    /// Natural angular frequency of undamped free oscillation (rad/s).
    ///
    /// ```text
    /// ω_n = sqrt(k / m)
    /// ```
    pub fn natural_frequency_rad_s(&self) -> f64 {
        (self.stiffness_n_per_m / self.mass_kg).sqrt()
    }

    /// Damping ratio ζ = c / (2·sqrt(k·m)), dimensionless.
    pub fn damping_ratio(&self) -> f64 {
        self.damping_n_s_per_m / (2.0 * (self.stiffness_n_per_m * self.mass_kg).sqrt())
    }

    /// Damped angular frequency ω_d = ω_n·sqrt(1 - ζ²) (rad/s).
    ///
    /// Only meaningful when underdamped; the argument of the square root is
    /// clamped at zero so ζ >= 1 yields 0 instead of NaN.
    pub fn damped_frequency_rad_s(&self) -> f64 {
        let zeta = self.damping_ratio();
        self.natural_frequency_rad_s() * (1.0 - zeta * zeta).max(0.0).sqrt()
    }

    /// Classify the damping regime from ζ.
    pub fn damping_class(&self) -> DampingClass {
        DampingClass::classify(self.damping_ratio())
    }

    /// Ratio of forcing frequency to natural frequency.
    pub fn frequency_ratio(&self) -> f64 {
        self.force_omega_rad_s / self.natural_frequency_rad_s()
    }

    /// Whether the forcing frequency is close enough to the natural
    /// frequency to expect an amplified response.
    pub fn near_resonance(&self) -> bool {
        (self.frequency_ratio() - 1.0).abs() < RESONANCE_BAND
    }

    /// External force A·cos(ω_f·t) (N) at the given time.
    pub fn external_force_n(&self, t_s: f64) -> f64 {
        self.force_amplitude_n * (self.force_omega_rad_s * t_s).cos()
    }

    /// Acceleration dv/dt (m/s²) at the given state and time.
    pub fn acceleration(&self, x_m: f64, v_m_s: f64, t_s: f64) -> f64 {
        (-self.stiffness_n_per_m * x_m - self.damping_n_s_per_m * v_m_s
            + self.external_force_n(t_s))
            / self.mass_kg
    }

    /// Total mechanical energy ½mv² + ½kx² (J).
    pub fn energy_j(&self, x_m: f64, v_m_s: f64) -> f64 {
        0.5 * self.mass_kg * v_m_s * v_m_s + 0.5 * self.stiffness_n_per_m * x_m * x_m
    }
}

impl Default for SpringMassParams {
    fn default() -> Self {
        Self {
            mass_kg: 1.0,
            stiffness_n_per_m: 10.0,
            damping_n_s_per_m: 0.5,
            x0_m: 0.1,
            force_amplitude_n: 0.0,
            force_omega_rad_s: 3.0,
        }
    }
}

/// Damping regime of the spring-mass oscillator.
///
/// The critical branch uses exact floating equality on ζ, matching the
/// reference behavior; it is reachable because c constructed as
/// 2·sqrt(k·m) divides out to exactly 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DampingClass {
    Underdamped,
    CriticallyDamped,
    Overdamped,
}

impl DampingClass {
    pub fn classify(zeta: f64) -> Self {
        if zeta < 1.0 {
            DampingClass::Underdamped
        } else if zeta == 1.0 {
            DampingClass::CriticallyDamped
        } else {
            DampingClass::Overdamped
        }
    }
}

impl fmt::Display for DampingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DampingClass::Underdamped => "underdamped",
            DampingClass::CriticallyDamped => "critically damped",
            DampingClass::Overdamped => "overdamped",
        };
        write!(f, "{label}")
    }
}

/// Derived quantities of the spring-mass oscillator, pure functions of
/// parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringMassObservables {
    /// Natural angular frequency ω_n (rad/s)
    pub natural_frequency_rad_s: f64,
    /// Damping ratio ζ
    pub damping_ratio: f64,
    /// Damped angular frequency ω_d (rad/s), 0 when ζ >= 1
    pub damped_frequency_rad_s: f64,
    /// Damping regime classification
    pub damping_class: DampingClass,
    /// Forcing-to-natural frequency ratio ω_f/ω_n
    pub frequency_ratio: f64,
    /// Whether |ω_f/ω_n - 1| < 0.1
    pub near_resonance: bool,
}

impl OscillatorModel for SpringMassParams {
    type State = SpringMassState;
    type Observables = SpringMassObservables;

    fn validate(&self) -> SimResult<()> {
        if self.mass_kg <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "mass must be positive",
            });
        }
        if self.stiffness_n_per_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "spring constant must be positive",
            });
        }
        if self.damping_n_s_per_m < 0.0 {
            return Err(SimError::InvalidArg {
                what: "damping cannot be negative",
            });
        }
        if self.force_amplitude_n < 0.0 {
            return Err(SimError::InvalidArg {
                what: "forcing amplitude cannot be negative",
            });
        }
        if self.force_omega_rad_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "forcing frequency must be positive",
            });
        }
        Ok(())
    }

    fn initial_state(&self) -> SpringMassState {
        SpringMassState {
            x_m: self.x0_m,
            v_m_s: 0.0,
            t_s: 0.0,
            energy_j: self.energy_j(self.x0_m, 0.0),
        }
    }

    fn step(&self, state: &SpringMassState, dt_s: f64) -> SpringMassState {
        // Forcing is evaluated at the pre-update time.
        let a = self.acceleration(state.x_m, state.v_m_s, state.t_s);
        let v_new = state.v_m_s + a * dt_s;
        // Post-update velocity; ordering is part of the contract.
        let x_new = state.x_m + v_new * dt_s;

        SpringMassState {
            x_m: x_new,
            v_m_s: v_new,
            t_s: state.t_s + dt_s,
            energy_j: self.energy_j(x_new, v_new),
        }
    }

    fn observables(&self) -> SpringMassObservables {
        SpringMassObservables {
            natural_frequency_rad_s: self.natural_frequency_rad_s(),
            damping_ratio: self.damping_ratio(),
            damped_frequency_rad_s: self.damped_frequency_rad_s(),
            damping_class: self.damping_class(),
            frequency_ratio: self.frequency_ratio(),
            near_resonance: self.near_resonance(),
        }
    }

    fn trail_coordinate(state: &SpringMassState) -> f64 {
        state.x_m
    }

    fn time_s(state: &SpringMassState) -> f64 {
        state.t_s
    }
}
