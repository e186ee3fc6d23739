// src/gui/components/listing_table.rs
//
// The per-seller table. Redrawn from the latest panel snapshot every frame;
// clicks are collected first and applied after the table is laid out.

use eframe::egui::{self, Align, Layout, RichText};
use egui_extras::{Column, TableBuilder};

use crate::{
    aggregate::Command,
    gui::app::App,
    render::{PanelRow, HEADERS},
};

enum RowClick {
    Whisper(usize),
    Clear(usize),
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let panel = app.panel_snapshot();
    let ctx = ui.ctx().clone();

    if panel.is_empty() {
        ui.label("No listings aggregated yet.");
        return;
    }

    let mut clicks: Vec<RowClick> = Vec::new();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().resizable(true).at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(120.0))
        .header(22.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(h).strong());
                    });
                });
            }
        })
        .body(|body| {
            body.rows(22.0, panel.rows.len(), |mut row| {
                let ix = row.index();
                let Some(data) = panel.rows.get(ix) else { return };

                let count = data.count.to_string();
                for text in [data.seller.as_str(), data.price_label(), count.as_str(), data.total_label.as_str()] {
                    row.col(|ui| {
                        ui.centered_and_justified(|ui| { ui.label(text); });
                    });
                }
                row.col(|ui| {
                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                        if ui.small_button("Whisper").clicked() {
                            clicks.push(RowClick::Whisper(ix));
                        }
                        if ui.small_button("Clear").clicked() {
                            clicks.push(RowClick::Clear(ix));
                        }
                    });
                });
            });
        });

    for click in clicks {
        match click {
            RowClick::Whisper(ix) => {
                if let Some(r) = panel.rows.get(ix) {
                    whisper(app, &ctx, r);
                }
            }
            RowClick::Clear(ix) => {
                if let Some(r) = panel.rows.get(ix) {
                    logf!("UI: clear {} / {}", r.seller, r.key);
                    app.send(Command::ResetEntry { seller: r.seller.clone(), key: r.key.clone() });
                }
            }
        }
    }
}

fn whisper(app: &App, ctx: &egui::Context, row: &PanelRow) {
    if !row.action.invoke() {
        app.status(format!("Listing from {} is no longer on the page", row.seller));
        return;
    }
    match app.take_whispers().pop() {
        Some(line) => {
            logd!("UI: whisper copied for {}", row.seller);
            ctx.copy_text(line);
            app.status(format!("Whisper to {} copied to clipboard", row.seller));
        }
        None => app.status(format!("Whisper sent to {}", row.seller)),
    }
}
