use clap::{Parser, Subcommand};
use osc_app::{
    AppResult, RunOutcome, RunRequest, Scenario, SystemParams, builtin_scenarios, execute_run,
    find_scenario, load_scenarios, write_series_csv,
};
use osc_sim::FRAME_DT_S;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "osc-cli")]
#[command(about = "Oscillab CLI - interactive oscillator simulations, headless", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scenarios
    Scenarios {
        /// Optional scenario YAML file (defaults to the built-in presets)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the derived quantities of a scenario
    Describe {
        /// Scenario name
        scenario: String,
        /// Optional scenario YAML file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Run a scenario headless
    Run {
        /// Scenario name
        scenario: String,
        /// Optional scenario YAML file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Fixed time step in seconds
        #[arg(long, default_value_t = FRAME_DT_S)]
        dt: f64,
        /// End time in seconds
        #[arg(long, default_value_t = 10.0)]
        t_end: f64,
        /// Record every N-th step
        #[arg(long, default_value_t = 1)]
        record_every: usize,
        /// Emit the recorded time series as CSV on stdout
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scenarios { file } => cmd_scenarios(file.as_deref()),
        Commands::Describe { scenario, file } => cmd_describe(&scenario, file.as_deref()),
        Commands::Run {
            scenario,
            file,
            dt,
            t_end,
            record_every,
            csv,
        } => cmd_run(&scenario, file.as_deref(), dt, t_end, record_every, csv),
    }
}

fn scenario_set(file: Option<&Path>) -> AppResult<Vec<Scenario>> {
    match file {
        Some(path) => load_scenarios(path),
        None => Ok(builtin_scenarios()),
    }
}

fn cmd_scenarios(file: Option<&Path>) -> AppResult<()> {
    let scenarios = scenario_set(file)?;

    if scenarios.is_empty() {
        println!("No scenarios found");
    } else {
        println!("Available scenarios:");
        for scenario in &scenarios {
            println!(
                "  {} [{}] - {}",
                scenario.name,
                scenario.system.label(),
                scenario.description
            );
        }
    }
    Ok(())
}

fn cmd_describe(name: &str, file: Option<&Path>) -> AppResult<()> {
    let scenarios = scenario_set(file)?;
    let scenario = find_scenario(&scenarios, name)?;

    println!("Scenario: {} [{}]", scenario.name, scenario.system.label());
    match &scenario.system {
        SystemParams::Pendulum(p) => {
            println!("  length:            {} m", p.length_m);
            println!("  initial angle:     {} rad", p.theta0_rad);
            println!("  damping:           {} 1/s", p.damping);
            println!("  natural frequency: {:.4} rad/s", p.natural_frequency_rad_s());
            println!("  period:            {:.4} s", p.period_s());
        }
        SystemParams::SpringMass(p) => {
            println!("  mass:              {} kg", p.mass_kg);
            println!("  spring constant:   {} N/m", p.stiffness_n_per_m);
            println!("  damping:           {} N·s/m", p.damping_n_s_per_m);
            println!("  initial position:  {} m", p.x0_m);
            println!("  forcing:           {} N at {} rad/s", p.force_amplitude_n, p.force_omega_rad_s);
            println!("  natural frequency: {:.4} rad/s", p.natural_frequency_rad_s());
            println!("  damping ratio:     {:.4} ({})", p.damping_ratio(), p.damping_class());
            println!("  damped frequency:  {:.4} rad/s", p.damped_frequency_rad_s());
            println!(
                "  frequency ratio:   {:.4}{}",
                p.frequency_ratio(),
                if p.near_resonance() { " (near resonance)" } else { "" }
            );
        }
    }
    Ok(())
}

fn cmd_run(
    name: &str,
    file: Option<&Path>,
    dt: f64,
    t_end: f64,
    record_every: usize,
    csv: bool,
) -> AppResult<()> {
    let scenarios = scenario_set(file)?;
    let scenario = find_scenario(&scenarios, name)?.clone();

    let request = RunRequest {
        scenario,
        dt_s: dt,
        t_end_s: t_end,
        record_every,
    };
    let (outcome, summary) = execute_run(&request)?;

    if csv {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_series_csv(&outcome, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    println!(
        "✓ Run completed: {} [{}], {} steps at dt={} s, t={:.3} s",
        summary.scenario, summary.system, summary.steps, summary.dt_s, summary.final_time_s
    );

    match &outcome {
        RunOutcome::Pendulum {
            record,
            observables,
        } => {
            let Some(last) = record.states.last() else {
                return Ok(());
            };
            println!("  final angle:       {:.6} rad", last.theta_rad);
            println!("  final velocity:    {:.6} rad/s", last.omega_rad_s);
            println!(
                "  natural frequency: {:.4} rad/s (period {:.4} s)",
                observables.natural_frequency_rad_s, observables.period_s
            );
        }
        RunOutcome::SpringMass {
            record,
            observables,
        } => {
            let Some(last) = record.states.last() else {
                return Ok(());
            };
            println!("  final position:    {:.6} m", last.x_m);
            println!("  final velocity:    {:.6} m/s", last.v_m_s);
            println!("  final energy:      {:.6} J", last.energy_j);
            println!(
                "  damping ratio:     {:.4} ({})",
                observables.damping_ratio, observables.damping_class
            );
            if observables.near_resonance {
                println!("  near resonance (ω_f/ω_n = {:.3})", observables.frequency_ratio);
            }
        }
    }
    Ok(())
}
