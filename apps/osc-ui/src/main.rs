#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod trace;

use app::OscillabApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("Oscillab"),
        ..Default::default()
    };

    eframe::run_native(
        "Oscillab",
        options,
        Box::new(|cc| Ok(Box::new(OscillabApp::new(cc)?))),
    )
}
