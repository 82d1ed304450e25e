// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! File list toolbar.
//!
//! Buttons for adding, removing and clearing queued MP3 files.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    AddFiles,
    RemoveSelected,
    Clear,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, enabled: bool, has_selection: bool, file_count: usize) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.add_enabled(enabled, egui::Button::new("➕ Add Files")).clicked() {
            action = ToolbarAction::AddFiles;
        }

        if ui
            .add_enabled(enabled && has_selection, egui::Button::new("➖ Remove Selected"))
            .clicked()
        {
            action = ToolbarAction::RemoveSelected;
        }

        if ui
            .add_enabled(enabled && file_count > 0, egui::Button::new("🗑 Clear"))
            .clicked()
        {
            action = ToolbarAction::Clear;
        }

        ui.separator();

        ui.label(egui::RichText::new(format!("{} file(s)", file_count)).italics().weak());
    });

    action
}
