// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal message dialogs.

use crate::models::batch::BatchReport;

/// A message waiting to be acknowledged.
pub enum Dialog {
    Warning(String),
    Summary(BatchReport),
}

impl Dialog {
    fn title(&self) -> &'static str {
        match self {
            Dialog::Warning(_) => "Warning",
            Dialog::Summary(_) => "Conversion Complete",
        }
    }

    fn body(&self) -> String {
        match self {
            Dialog::Warning(message) => message.clone(),
            Dialog::Summary(report) => report.summary(),
        }
    }
}

/// Show `dialog` centered over the window. Returns true once dismissed.
pub fn show(ctx: &egui::Context, dialog: &Dialog) -> bool {
    let mut dismissed = false;

    egui::Window::new(dialog.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.label(dialog.body());
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }

    dismissed
}
