// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the converter window: it owns the file list and
//! settings, starts batches on a background worker and folds the worker's
//! progress events back into the UI each frame.

use crate::io::{config, ffmpeg::Toolchain};
use crate::models::batch::BatchEvent;
use crate::models::settings::Settings;
use crate::pipeline::Converter;
use crate::ui::dialog::{self, Dialog};
use crate::ui::file_list::{self, DropOutcome, FileList};
use crate::ui::settings_panel::{self, SettingsAction};
use crate::ui::toolbar::{self, ToolbarAction};
use crate::worker::BatchHandle;
use std::path::PathBuf;
use std::time::Duration;

/// Progress of the running (or last) batch.
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    done: usize,
    total: usize,
}

impl Progress {
    fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f32 / self.total as f32
        }
    }
}

/// Main application state.
pub struct ConverterApp {
    /// Active settings, saved to `config_path` when a batch starts
    settings: Settings,

    /// Where settings are persisted
    config_path: PathBuf,

    /// Files queued for conversion
    files: FileList,

    /// Conversion backend
    converter: Converter,

    /// Shown when FFmpeg could not be found
    toolchain_warning: Option<String>,

    /// Running batch, if any
    batch: Option<BatchHandle>,

    progress: Progress,

    /// Status line under the progress bar
    status: String,

    /// Message waiting for the user to acknowledge
    dialog: Option<Dialog>,
}

impl ConverterApp {
    /// Create the application, loading settings from `config_path`.
    pub fn new(config_path: PathBuf, toolchain: Toolchain) -> Self {
        let settings = config::load_or_default(&config_path);
        let toolchain_warning = toolchain.missing_message();

        Self {
            settings,
            config_path,
            files: FileList::default(),
            converter: Converter::new(toolchain),
            toolchain_warning,
            batch: None,
            progress: Progress::default(),
            status: "Ready".to_string(),
            dialog: None,
        }
    }

    fn is_running(&self) -> bool {
        self.batch.is_some()
    }

    /// Open the native file picker and queue the chosen files.
    fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .set_title("Select MP3 files")
            .add_filter("MP3 files", &["mp3", "MP3"])
            .pick_files()
        {
            let added = self.files.add(paths);
            log::info!("Added {} file(s), total: {}", added, self.files.len());
        }
    }

    fn pick_output_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new()
            .set_title("Select output folder")
            .pick_folder()
        {
            self.settings.output_folder = folder.display().to_string();
        }
    }

    /// Save settings and start converting the queued files.
    fn start_conversion(&mut self) {
        if self.files.is_empty() {
            self.dialog = Some(Dialog::Warning("Select MP3 files first.".to_string()));
            return;
        }

        config::save_quietly(&self.settings, &self.config_path);

        let files = self.files.files().to_vec();
        self.progress = Progress {
            done: 0,
            total: files.len(),
        };
        self.status = "Starting...".to_string();
        self.batch = Some(BatchHandle::spawn(
            files,
            self.settings.clone(),
            self.converter.clone(),
        ));
    }

    fn cancel_conversion(&mut self) {
        if let Some(ref batch) = self.batch {
            batch.cancel();
            self.status = "Cancelling after the current file...".to_string();
        }
    }

    /// Apply events from the worker thread.
    fn poll_batch(&mut self) {
        let Some(ref batch) = self.batch else {
            return;
        };

        let mut finished = false;
        for event in batch.drain() {
            match event {
                BatchEvent::Started {
                    index,
                    total,
                    file_name,
                } => {
                    if !batch.is_cancelling() {
                        self.status = format!("Converting... ({}/{}) {}", index + 1, total, file_name);
                    }
                }
                BatchEvent::Finished {
                    index,
                    total,
                    outcome,
                } => {
                    self.progress = Progress {
                        done: index + 1,
                        total,
                    };
                    if let Ok(output) = outcome {
                        log::debug!("Finished {}/{}: {}", index + 1, total, output.display());
                    }
                }
                BatchEvent::Completed(report) => {
                    self.status = if report.cancelled {
                        "Cancelled".to_string()
                    } else {
                        "Done".to_string()
                    };
                    self.dialog = Some(Dialog::Summary(report));
                    finished = true;
                }
            }
        }

        if finished {
            self.batch = None;
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_batch();

        // Keep polling the worker while it runs
        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let editable = !self.is_running();

        if let DropOutcome::Ignored(count) = file_list::handle_dropped_files(ctx, &mut self.files, editable) {
            self.status = format!("Ignored {} dropped file(s): conversion in progress", count);
        }

        // Start/cancel and progress (bottom)
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let can_start = editable && self.converter.toolchain().is_available();
                if ui.add_enabled(can_start, egui::Button::new("▶ Start Conversion")).clicked() {
                    self.start_conversion();
                }

                let can_cancel = self.batch.as_ref().is_some_and(|b| !b.is_cancelling());
                if ui.add_enabled(can_cancel, egui::Button::new("⏹ Cancel")).clicked() {
                    self.cancel_conversion();
                }
            });

            ui.add_space(4.0);
            ui.add(
                egui::ProgressBar::new(self.progress.fraction())
                    .text(format!("{}/{}", self.progress.done, self.progress.total)),
            );
            ui.label(&self.status);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref warning) = self.toolchain_warning {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("⚠").color(egui::Color32::YELLOW));
                    ui.label(egui::RichText::new(warning).color(egui::Color32::YELLOW));
                });
                ui.separator();
            }

            ui.heading("MP3 files");
            let action = toolbar::show(ui, editable, self.files.has_selection(), self.files.len());
            match action {
                ToolbarAction::AddFiles => self.pick_files(),
                ToolbarAction::RemoveSelected => self.files.remove_selected(),
                ToolbarAction::Clear => self.files.clear(),
                ToolbarAction::None => {}
            }

            file_list::show(ui, &mut self.files, editable);

            ui.add_space(8.0);
            ui.heading("Settings");
            match settings_panel::show(ui, &mut self.settings, editable) {
                SettingsAction::BrowseOutputFolder => self.pick_output_folder(),
                SettingsAction::None => {}
            }
        });

        if let Some(ref pending) = self.dialog {
            if dialog::show(ctx, pending) {
                self.dialog = None;
            }
        }
    }
}
