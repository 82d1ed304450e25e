// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MP3 to MP4 Converter
//!
//! A cross-platform desktop application that turns MP3 files into MP4
//! videos showing the track's cover art (or a black frame) for the whole
//! length of the audio.

mod app;
mod error;
mod io;
mod models;
mod pipeline;
mod ui;
mod util;
mod worker;

use anyhow::Result;
use app::ConverterApp;
use io::{config::CONFIG_FILE, ffmpeg::Toolchain};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let toolchain = Toolchain::locate();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("MP3 to MP4 Converter"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MP3 to MP4 Converter",
        options,
        Box::new(move |_cc| Ok(Box::new(ConverterApp::new(PathBuf::from(CONFIG_FILE), toolchain)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
