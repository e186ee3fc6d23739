// src/gui/components/controls.rs
//
// Top-level overlay buttons: Hide / Clear All / Refresh, and the lone
// "Show Aggregator" button while hidden.

use eframe::egui;

use crate::{aggregate::Command, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        if ui.button("Hide").clicked() {
            app.hide();
        }
        if ui.button("Clear All").clicked() {
            logf!("UI: clear all");
            app.send(Command::ResetAll);
            app.status("Cleared");
        }
        if ui.button("Refresh").clicked() {
            logf!("UI: refresh");
            app.send(Command::Refresh);
            app.status("Refreshing…");
        }
    });
}

pub fn draw_show(ui: &mut egui::Ui, app: &mut App) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        if ui.button("Show Aggregator").clicked() {
            app.show();
        }
    });
}
