//! Scenario presets and YAML scenario files.
//!
//! A scenario names one oscillator system with a full parameter set. The
//! service layer enforces the slider ranges here, upstream of the
//! simulation core; the core only checks for degenerate values.

use crate::error::{AppError, AppResult};
use osc_sim::{PendulumParams, SpringMassParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one oscillator system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemParams {
    Pendulum(PendulumParams),
    SpringMass(SpringMassParams),
}

impl SystemParams {
    pub fn label(&self) -> &'static str {
        match self {
            SystemParams::Pendulum(_) => "pendulum",
            SystemParams::SpringMass(_) => "spring-mass",
        }
    }
}

/// A named, ready-to-run parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system: SystemParams,
}

/// Built-in instructional presets.
pub fn builtin_scenarios() -> Vec<Scenario> {
    let spring = SpringMassParams::default();
    let omega_n = spring.natural_frequency_rad_s();

    // Critical damping 2·sqrt(k·m) has to land inside the damping slider
    // range, which caps k·m for this preset.
    let critical_m: f64 = 0.5;
    let critical_k: f64 = 8.0;
    let critical_c = 2.0 * (critical_k * critical_m).sqrt();

    vec![
        Scenario {
            name: "pendulum".to_string(),
            description: "Lightly damped pendulum released from 0.3 rad".to_string(),
            system: SystemParams::Pendulum(PendulumParams::default()),
        },
        Scenario {
            name: "pendulum-undamped".to_string(),
            description: "Frictionless pendulum, constant amplitude".to_string(),
            system: SystemParams::Pendulum(PendulumParams {
                damping: 0.0,
                ..PendulumParams::default()
            }),
        },
        Scenario {
            name: "spring".to_string(),
            description: "Lightly damped spring-mass released from 0.1 m".to_string(),
            system: SystemParams::SpringMass(spring.clone()),
        },
        Scenario {
            name: "spring-critical".to_string(),
            description: "Critically damped return, no overshoot".to_string(),
            system: SystemParams::SpringMass(SpringMassParams {
                mass_kg: critical_m,
                stiffness_n_per_m: critical_k,
                damping_n_s_per_m: critical_c,
                ..spring.clone()
            }),
        },
        Scenario {
            name: "spring-overdamped".to_string(),
            description: "Slow non-oscillatory return".to_string(),
            system: SystemParams::SpringMass(SpringMassParams {
                mass_kg: 0.5,
                stiffness_n_per_m: 1.0,
                damping_n_s_per_m: 4.0,
                x0_m: 0.2,
                ..spring.clone()
            }),
        },
        Scenario {
            name: "spring-resonance".to_string(),
            description: "Driven at the natural frequency, amplified response".to_string(),
            system: SystemParams::SpringMass(SpringMassParams {
                x0_m: 0.0,
                force_amplitude_n: 5.0,
                force_omega_rad_s: omega_n,
                ..spring
            }),
        },
    ]
}

/// Load scenarios from a YAML file (a list of scenario entries).
pub fn load_scenarios(path: &Path) -> AppResult<Vec<Scenario>> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios: Vec<Scenario> = serde_yaml::from_str(&text)?;
    for scenario in &scenarios {
        validate_scenario(scenario)?;
    }
    Ok(scenarios)
}

/// Find a scenario by name.
pub fn find_scenario<'a>(scenarios: &'a [Scenario], name: &str) -> AppResult<&'a Scenario> {
    scenarios
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| AppError::ScenarioNotFound(name.to_string()))
}

/// Enforce the control-surface parameter ranges.
///
/// The simulation core assumes in-range values; anything reaching a
/// session must pass through here (or through equally range-bound UI
/// controls).
pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    match &scenario.system {
        SystemParams::Pendulum(p) => {
            PendulumParams::LENGTH_RANGE.check(p.length_m, "pendulum length")?;
            PendulumParams::THETA0_RANGE.check(p.theta0_rad, "initial angle")?;
            PendulumParams::DAMPING_RANGE.check(p.damping, "pendulum damping")?;
        }
        SystemParams::SpringMass(p) => {
            SpringMassParams::MASS_RANGE.check(p.mass_kg, "mass")?;
            SpringMassParams::STIFFNESS_RANGE.check(p.stiffness_n_per_m, "spring constant")?;
            SpringMassParams::DAMPING_RANGE.check(p.damping_n_s_per_m, "spring damping")?;
            SpringMassParams::X0_RANGE.check(p.x0_m, "initial position")?;
            SpringMassParams::FORCE_AMPLITUDE_RANGE
                .check(p.force_amplitude_n, "forcing amplitude")?;
            SpringMassParams::FORCE_OMEGA_RANGE.check(p.force_omega_rad_s, "forcing frequency")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scenarios_are_in_range() {
        let scenarios = builtin_scenarios();
        assert!(!scenarios.is_empty());
        for scenario in &scenarios {
            validate_scenario(scenario).unwrap();
        }
    }

    #[test]
    fn builtin_names_are_unique() {
        let scenarios = builtin_scenarios();
        let mut names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn critical_preset_classifies_exactly() {
        let scenarios = builtin_scenarios();
        let scenario = find_scenario(&scenarios, "spring-critical").unwrap();
        match &scenario.system {
            SystemParams::SpringMass(p) => {
                assert_eq!(p.damping_ratio(), 1.0);
                assert_eq!(p.damping_class(), osc_sim::DampingClass::CriticallyDamped);
            }
            _ => panic!("expected spring-mass"),
        }
    }

    #[test]
    fn resonance_preset_is_flagged() {
        let scenarios = builtin_scenarios();
        let scenario = find_scenario(&scenarios, "spring-resonance").unwrap();
        match &scenario.system {
            SystemParams::SpringMass(p) => assert!(p.near_resonance()),
            _ => panic!("expected spring-mass"),
        }
    }

    #[test]
    fn find_by_name() {
        let scenarios = builtin_scenarios();
        assert!(find_scenario(&scenarios, "spring-resonance").is_ok());
        assert!(matches!(
            find_scenario(&scenarios, "nope"),
            Err(AppError::ScenarioNotFound(_))
        ));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let scenario = Scenario {
            name: "bad".to_string(),
            description: String::new(),
            system: SystemParams::Pendulum(PendulumParams {
                length_m: 5.0,
                ..PendulumParams::default()
            }),
        };
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(format!("{err}").contains("pendulum length"));
    }

    #[test]
    fn yaml_round_trip() {
        let scenarios = builtin_scenarios();
        let text = serde_yaml::to_string(&scenarios).unwrap();
        let parsed: Vec<Scenario> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, scenarios);
    }

    #[test]
    fn yaml_defaults_fill_omitted_fields() {
        let text = r#"
- name: classroom-pendulum
  description: hand-written scenario file
  system:
    pendulum:
      length_m: 1.5
      theta0_rad: 0.5
      damping: 0.2
"#;
        let parsed: Vec<Scenario> = serde_yaml::from_str(text).unwrap();
        match &parsed[0].system {
            SystemParams::Pendulum(p) => {
                assert_eq!(p.gravity_m_s2, osc_core::units::constants::G_MPS2)
            }
            _ => panic!("expected pendulum"),
        }
    }
}
