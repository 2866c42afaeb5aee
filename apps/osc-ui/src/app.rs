use crate::trace::PlotTrace;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use osc_app::{Scenario, SystemParams, builtin_scenarios};
use osc_core::ParamRange;
use osc_sim::{PendulumParams, Session, SimError, SpringMassParams};

pub struct OscillabApp {
    active_tab: SystemTab,

    pendulum: Session<PendulumParams>,
    pendulum_edit: PendulumParams,
    pendulum_trace: PlotTrace,

    spring: Session<SpringMassParams>,
    spring_edit: SpringMassParams,
    spring_trace: PlotTrace,
    energy_trace: PlotTrace,

    presets: Vec<Scenario>,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SystemTab {
    Pendulum,
    SpringMass,
}

fn slider_range(range: ParamRange) -> std::ops::RangeInclusive<f64> {
    range.min..=range.max
}

impl OscillabApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, SimError> {
        let pendulum = Session::with_frame_step(PendulumParams::default())?;
        let spring = Session::with_frame_step(SpringMassParams::default())?;

        Ok(Self {
            active_tab: SystemTab::Pendulum,
            pendulum_edit: pendulum.params().clone(),
            pendulum,
            pendulum_trace: PlotTrace::new(),
            spring_edit: spring.params().clone(),
            spring,
            spring_trace: PlotTrace::new(),
            energy_trace: PlotTrace::new(),
            presets: builtin_scenarios(),
            status: None,
        })
    }

    /// One integration step, then one trace sample. Exactly once per frame
    /// while running; the plot never observes a half-updated state.
    fn advance_active(&mut self) {
        match self.active_tab {
            SystemTab::Pendulum => {
                if self.pendulum.tick() {
                    self.pendulum_trace
                        .push(self.pendulum.time_s(), self.pendulum.state().theta_rad);
                }
            }
            SystemTab::SpringMass => {
                if self.spring.tick() {
                    let state = self.spring.state();
                    self.spring_trace.push(state.t_s, state.x_m);
                    self.energy_trace.push(state.t_s, state.energy_j);
                }
            }
        }
    }

    fn active_running(&self) -> bool {
        match self.active_tab {
            SystemTab::Pendulum => self.pendulum.is_running(),
            SystemTab::SpringMass => self.spring.is_running(),
        }
    }

    fn toggle_active(&mut self) {
        match self.active_tab {
            SystemTab::Pendulum => self.pendulum.toggle(),
            SystemTab::SpringMass => self.spring.toggle(),
        }
    }

    fn reset_active(&mut self) {
        match self.active_tab {
            SystemTab::Pendulum => {
                self.pendulum.reset();
                self.pendulum_trace.clear();
            }
            SystemTab::SpringMass => {
                self.spring.reset();
                self.spring_trace.clear();
                self.energy_trace.clear();
            }
        }
    }

    fn apply_preset(&mut self, scenario: &Scenario) {
        let result = match &scenario.system {
            SystemParams::Pendulum(params) => {
                self.pendulum_edit = params.clone();
                self.pendulum.set_params(params.clone())
            }
            SystemParams::SpringMass(params) => {
                self.spring_edit = params.clone();
                self.spring.set_params(params.clone())
            }
        };
        match result {
            Ok(()) => {
                self.reset_active();
                self.status = None;
            }
            Err(e) => self.status = Some(format!("Preset rejected: {e}")),
        }
    }

    fn preset_picker(&mut self, ui: &mut egui::Ui) {
        let wanted = match self.active_tab {
            SystemTab::Pendulum => "pendulum",
            SystemTab::SpringMass => "spring-mass",
        };

        let mut chosen: Option<usize> = None;
        egui::ComboBox::from_label("Preset")
            .selected_text("apply…")
            .show_ui(ui, |ui| {
                for (i, scenario) in self.presets.iter().enumerate() {
                    if scenario.system.label() != wanted {
                        continue;
                    }
                    if ui.selectable_label(false, &scenario.name).clicked() {
                        chosen = Some(i);
                    }
                }
            });

        if let Some(i) = chosen {
            let scenario = self.presets[i].clone();
            self.apply_preset(&scenario);
        }
    }

    fn pendulum_controls(&mut self, ui: &mut egui::Ui) {
        let p = &mut self.pendulum_edit;
        let mut changed = false;
        changed |= ui
            .add(
                egui::Slider::new(&mut p.length_m, slider_range(PendulumParams::LENGTH_RANGE))
                    .text("Length (m)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut p.theta0_rad, slider_range(PendulumParams::THETA0_RANGE))
                    .text("Initial angle (rad)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut p.damping, slider_range(PendulumParams::DAMPING_RANGE))
                    .text("Damping (1/s)"),
            )
            .changed();

        if changed {
            match self.pendulum.set_params(self.pendulum_edit.clone()) {
                // Re-seed while idle at t=0 so initial-condition sliders
                // preview immediately; a paused mid-run state stays frozen.
                Ok(()) if !self.pendulum.is_running() && self.pendulum.time_s() == 0.0 => {
                    self.pendulum.reset();
                    self.pendulum_trace.clear();
                }
                Ok(()) => {}
                Err(e) => self.status = Some(format!("Parameters rejected: {e}")),
            }
        }
    }

    fn spring_controls(&mut self, ui: &mut egui::Ui) {
        let p = &mut self.spring_edit;
        let mut changed = false;
        changed |= ui
            .add(
                egui::Slider::new(&mut p.mass_kg, slider_range(SpringMassParams::MASS_RANGE))
                    .text("Mass (kg)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut p.stiffness_n_per_m,
                    slider_range(SpringMassParams::STIFFNESS_RANGE),
                )
                .text("Spring constant (N/m)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut p.damping_n_s_per_m,
                    slider_range(SpringMassParams::DAMPING_RANGE),
                )
                .text("Damping (N·s/m)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut p.x0_m, slider_range(SpringMassParams::X0_RANGE))
                    .text("Initial position (m)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut p.force_amplitude_n,
                    slider_range(SpringMassParams::FORCE_AMPLITUDE_RANGE),
                )
                .text("Forcing amplitude (N)"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut p.force_omega_rad_s,
                    slider_range(SpringMassParams::FORCE_OMEGA_RANGE),
                )
                .text("Forcing frequency (rad/s)"),
            )
            .changed();

        if changed {
            match self.spring.set_params(self.spring_edit.clone()) {
                Ok(()) if !self.spring.is_running() && self.spring.time_s() == 0.0 => {
                    self.spring.reset();
                    self.spring_trace.clear();
                    self.energy_trace.clear();
                }
                Ok(()) => {}
                Err(e) => self.status = Some(format!("Parameters rejected: {e}")),
            }
        }
    }

    fn pendulum_readouts(&self, ui: &mut egui::Ui) {
        let snapshot = self.pendulum.snapshot();
        ui.heading("Readouts");
        ui.monospace(format!("t  = {:>8.3} s", snapshot.state.t_s));
        ui.monospace(format!("θ  = {:>8.4} rad", snapshot.state.theta_rad));
        ui.monospace(format!("ω  = {:>8.4} rad/s", snapshot.state.omega_rad_s));
        ui.separator();
        ui.monospace(format!(
            "ω_n = {:.4} rad/s",
            snapshot.observables.natural_frequency_rad_s
        ));
        ui.monospace(format!("T   = {:.4} s", snapshot.observables.period_s));
    }

    fn spring_readouts(&self, ui: &mut egui::Ui) {
        let snapshot = self.spring.snapshot();
        ui.heading("Readouts");
        ui.monospace(format!("t  = {:>8.3} s", snapshot.state.t_s));
        ui.monospace(format!("x  = {:>8.4} m", snapshot.state.x_m));
        ui.monospace(format!("v  = {:>8.4} m/s", snapshot.state.v_m_s));
        ui.monospace(format!("E  = {:>8.5} J", snapshot.state.energy_j));
        ui.separator();
        let obs = &snapshot.observables;
        ui.monospace(format!("ω_n = {:.4} rad/s", obs.natural_frequency_rad_s));
        ui.monospace(format!("ζ   = {:.4} ({})", obs.damping_ratio, obs.damping_class));
        ui.monospace(format!("ω_d = {:.4} rad/s", obs.damped_frequency_rad_s));
        ui.monospace(format!("ω_f/ω_n = {:.3}", obs.frequency_ratio));
        if obs.near_resonance {
            ui.colored_label(egui::Color32::YELLOW, "near resonance");
        }
    }

    /// Recent-motion overlay reconstructed from the session trail: samples
    /// are one fixed step apart, ending at the current time.
    fn trail_points(trail: &[f64], t_now: f64, dt_s: f64) -> Vec<[f64; 2]> {
        let n = trail.len();
        trail
            .iter()
            .enumerate()
            .map(|(i, &value)| [t_now - (n - 1 - i) as f64 * dt_s, value])
            .collect()
    }

    fn pendulum_plot(&self, ui: &mut egui::Ui) {
        let points: PlotPoints = self.pendulum_trace.points().into();
        let line = Line::new(points).name("θ (rad)");

        let snapshot = self.pendulum.snapshot();
        let trail: PlotPoints =
            Self::trail_points(&snapshot.trail, snapshot.state.t_s, self.pendulum.dt_s()).into();
        let trail_line = Line::new(trail).width(2.5).name("recent");

        Plot::new("pendulum_plot")
            .legend(Legend::default())
            .x_axis_label("Time (s)")
            .y_axis_label("Angle (rad)")
            .show(ui, |plot_ui| {
                plot_ui.line(line);
                plot_ui.line(trail_line);
            });
    }

    fn spring_plot(&self, ui: &mut egui::Ui) {
        let x_points: PlotPoints = self.spring_trace.points().into();
        let e_points: PlotPoints = self.energy_trace.points().into();

        let snapshot = self.spring.snapshot();
        let trail: PlotPoints =
            Self::trail_points(&snapshot.trail, snapshot.state.t_s, self.spring.dt_s()).into();

        Plot::new("spring_plot")
            .legend(Legend::default())
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(x_points).name("x (m)"));
                plot_ui.line(Line::new(e_points).name("E (J)"));
                plot_ui.line(Line::new(trail).width(2.5).name("recent"));
            });
    }
}

impl eframe::App for OscillabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_active();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Oscillab");
                ui.separator();
                ui.selectable_value(&mut self.active_tab, SystemTab::Pendulum, "Pendulum");
                ui.selectable_value(&mut self.active_tab, SystemTab::SpringMass, "Spring-Mass");
                ui.separator();

                let label = if self.active_running() { "Pause" } else { "Start" };
                if ui.button(label).clicked() {
                    self.toggle_active();
                }
                if ui.button("Reset").clicked() {
                    self.reset_active();
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(if self.active_running() {
                    "Running"
                } else {
                    "Paused"
                });
                let t = match self.active_tab {
                    SystemTab::Pendulum => self.pendulum.time_s(),
                    SystemTab::SpringMass => self.spring.time_s(),
                };
                ui.label(format!("t = {t:.2} s"));
                if let Some(message) = &self.status {
                    ui.colored_label(egui::Color32::RED, message);
                }
            });
        });

        egui::SidePanel::left("controls")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");
                self.preset_picker(ui);
                ui.separator();
                match self.active_tab {
                    SystemTab::Pendulum => {
                        self.pendulum_controls(ui);
                        ui.separator();
                        self.pendulum_readouts(ui);
                    }
                    SystemTab::SpringMass => {
                        self.spring_controls(ui);
                        ui.separator();
                        self.spring_readouts(ui);
                    }
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.active_tab {
            SystemTab::Pendulum => self.pendulum_plot(ui),
            SystemTab::SpringMass => self.spring_plot(ui),
        });

        // Re-arm the next frame only while running; pausing simply stops
        // requesting repaints, so no stale step can arrive.
        if self.active_running() {
            ctx.request_repaint();
        }
    }
}
