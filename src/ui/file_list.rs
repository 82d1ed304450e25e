// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Input file list.
//!
//! This module keeps the ordered list of MP3 files queued for conversion,
//! renders it with per-row selection, and accepts files dropped onto the
//! window.

use crate::models::batch::display_name;
use crate::util::naming::is_mp3;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Ordered, duplicate-free list of input files plus the current selection.
#[derive(Debug, Default)]
pub struct FileList {
    files: Vec<PathBuf>,
    selected: BTreeSet<usize>,
}

impl FileList {
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Append MP3 files not already present. Returns how many were added.
    pub fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let mut added = 0;
        for path in paths {
            if !is_mp3(&path) {
                log::debug!("Ignoring non-MP3 input {}", path.display());
                continue;
            }
            if self.files.contains(&path) {
                continue;
            }
            self.files.push(path);
            added += 1;
        }
        added
    }

    /// Remove every selected row.
    pub fn remove_selected(&mut self) {
        for &idx in self.selected.iter().rev() {
            if idx < self.files.len() {
                self.files.remove(idx);
            }
        }
        self.selected.clear();
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.selected.clear();
    }

    fn toggle(&mut self, idx: usize) {
        if !self.selected.remove(&idx) {
            self.selected.insert(idx);
        }
    }
}

/// What happened to a batch of files dropped onto the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    None,
    Added(usize),
    /// Dropped while the list was locked
    Ignored(usize),
}

/// Queue `dropped` if the list is editable.
pub fn accept_drop(list: &mut FileList, dropped: Vec<PathBuf>, enabled: bool) -> DropOutcome {
    if dropped.is_empty() {
        return DropOutcome::None;
    }
    if !enabled {
        log::info!("Ignored {} file(s) dropped during conversion", dropped.len());
        return DropOutcome::Ignored(dropped.len());
    }

    let added = list.add(dropped);
    log::info!("Added {} dropped file(s)", added);
    DropOutcome::Added(added)
}

/// Display the file list. Rows toggle selection when clicked.
pub fn show(ui: &mut egui::Ui, list: &mut FileList, enabled: bool) {
    let height = (ui.available_height() - 200.0).max(120.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_height(height);
        ui.set_width(ui.available_width());

        if list.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Drop MP3 files here or click Add Files")
                        .italics()
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        egui::ScrollArea::vertical()
            .max_height(height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut clicked = None;
                for (idx, path) in list.files.iter().enumerate() {
                    let selected = list.selected.contains(&idx);
                    let row = ui
                        .add_enabled(enabled, egui::SelectableLabel::new(selected, display_name(path)))
                        .on_hover_text(path.display().to_string());
                    if row.clicked() {
                        clicked = Some(idx);
                    }
                }
                if let Some(idx) = clicked {
                    list.toggle(idx);
                }
            });
    });
}

/// Collect files dropped onto the window and highlight it while hovering.
pub fn handle_dropped_files(ctx: &egui::Context, list: &mut FileList, enabled: bool) -> DropOutcome {
    let dropped: Vec<PathBuf> = ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|f| f.path.clone())
            .collect()
    });

    let outcome = accept_drop(list, dropped, enabled);

    let is_dragging = ctx.input(|i| !i.raw.hovered_files.is_empty());
    if is_dragging && enabled {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_highlight"),
        ));
        painter.rect_stroke(
            ctx.screen_rect().shrink(2.0),
            4.0,
            egui::Stroke::new(2.0, egui::Color32::from_rgb(100, 200, 255)),
        );
    }

    outcome
}
