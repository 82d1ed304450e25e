// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Conversion settings panel.
//!
//! This module provides the widgets for choosing the video format, quality,
//! output folder and file naming scheme.

use crate::models::settings::{AspectRatio, FilenameScheme, Quality, Settings};

/// Result of settings panel interaction.
pub enum SettingsAction {
    None,
    BrowseOutputFolder,
}

/// Display the settings grid.
pub fn show(ui: &mut egui::Ui, settings: &mut Settings, enabled: bool) -> SettingsAction {
    let mut action = SettingsAction::None;

    ui.add_enabled_ui(enabled, |ui| {
        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Video format:");
                egui::ComboBox::from_id_source("video_format")
                    .selected_text(settings.video_format.label())
                    .show_ui(ui, |ui| {
                        for aspect in AspectRatio::all() {
                            ui.selectable_value(&mut settings.video_format, *aspect, aspect.label());
                        }
                    });
                ui.end_row();

                ui.label("Quality:");
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_source("quality")
                        .selected_text(settings.quality.label())
                        .show_ui(ui, |ui| {
                            for quality in Quality::all() {
                                ui.selectable_value(&mut settings.quality, *quality, quality.label());
                            }
                        });
                    let (width, height) = settings.dimensions();
                    ui.label(egui::RichText::new(format!("{}×{}", width, height)).weak());
                });
                ui.end_row();

                ui.label("Output folder:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut settings.output_folder)
                            .hint_text("Same folder as each MP3")
                            .desired_width(320.0),
                    );
                    if ui.button("Browse...").clicked() {
                        action = SettingsAction::BrowseOutputFolder;
                    }
                });
                ui.end_row();

                ui.label("File name:");
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_source("filename_format")
                        .selected_text(settings.filename_format.label())
                        .show_ui(ui, |ui| {
                            for scheme in FilenameScheme::all() {
                                ui.selectable_value(&mut settings.filename_format, *scheme, scheme.label());
                            }
                        });
                    ui.label(
                        egui::RichText::new(settings.filename_format.description())
                            .italics()
                            .weak(),
                    );
                });
                ui.end_row();
            });
    });

    action
}
