// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use trade_aggregator::{
    cli::{self, CliAction},
    config::state::GuiState,
    gui,
};

fn app_icon() -> Option<IconData> {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/aggregator.png"
    )))
    .ok()?
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(IconData { rgba: rgba.into_raw(), width: w, height: h })
}

fn main() {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(o)) => o,
        Ok(CliAction::Help) => {
            eprintln!("{}", cli::HELP);
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let gui_defaults = GuiState::default();
    let mut viewport = ViewportBuilder::default()
        .with_inner_size([gui_defaults.window_w as f32, gui_defaults.window_h as f32])
        .with_always_on_top();
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }

    let native = eframe::NativeOptions { viewport, ..Default::default() };

    if let Err(e) = gui::run(native, options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
