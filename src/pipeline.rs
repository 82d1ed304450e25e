// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Single-file conversion.
//!
//! Turns one MP3 into one MP4: extract the cover, prepare the still frame,
//! resolve the output path and hand everything to FFmpeg. Intermediate
//! images are `TempPath`s, so they are removed on every exit path.

use crate::error::ConvertResult;
use crate::io::{artwork, ffmpeg::Toolchain, still_image};
use crate::models::{batch::ConversionJob, settings::Settings};
use crate::util::naming;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Resolve where `source` will be written and at what size.
pub fn plan_job(source: &Path, settings: &Settings) -> ConvertResult<ConversionJob> {
    let (width, height) = settings.dimensions();
    let file_name = naming::output_file_name(source, settings.filename_format)?;
    let output_path = naming::output_dir(source, &settings.output_folder).join(file_name);

    Ok(ConversionJob {
        source: source.to_path_buf(),
        output_path,
        width,
        height,
    })
}

/// Build the still frame for `source`, falling back to the placeholder when
/// the embedded cover cannot be decoded.
pub fn prepare_frame(source: &Path, width: u32, height: u32) -> ConvertResult<TempPath> {
    // The extracted cover is deleted when `cover` drops at the end of this
    // function, once the prepared frame has superseded it.
    let cover = artwork::extract_front_cover(source);

    match cover {
        None => still_image::prepare(None, width, height),
        Some(cover) => match still_image::prepare(Some(&cover), width, height) {
            Ok(frame) => Ok(frame),
            Err(e) => {
                log::warn!(
                    "Unreadable cover art in {} ({}), using placeholder",
                    source.display(),
                    e
                );
                still_image::prepare(None, width, height)
            }
        },
    }
}

/// Converts MP3 files to still-image MP4 videos.
#[derive(Debug, Clone)]
pub struct Converter {
    toolchain: Toolchain,
}

impl Converter {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Convert one file, returning the path of the written video.
    pub fn convert(&self, source: &Path, settings: &Settings) -> ConvertResult<PathBuf> {
        let (width, height) = settings.dimensions();
        let frame = prepare_frame(source, width, height)?;
        let job = plan_job(source, settings)?;

        let duration = self.toolchain.probe_duration(&job.source)?;
        log::debug!(
            "{}: {:.2}s, {}x{} -> {}",
            job.source.display(),
            duration,
            job.width,
            job.height,
            job.output_path.display()
        );

        self.toolchain
            .mux_still_image(&frame, &job.source, duration, &job.output_path)?;

        log::info!("Wrote {}", job.output_path.display());
        Ok(job.output_path)
    }
}
