// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Still frame preparation.
//!
//! Produces the single image shown for the whole video: either the cover art
//! stretched to the target size, or a black placeholder when there is no art.

use crate::error::{ConvertError, ConvertResult};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempPath;

/// Placeholder color for tracks without cover art.
pub const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Decode an image, sniffing the format from its content rather than trusting
/// the file extension.
fn decode(path: &Path) -> ConvertResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| ConvertError::io(format!("Failed to open image {}", path.display()), e))?;
    Ok(reader.decode()?)
}

/// Build the still frame in memory.
pub fn render(source: Option<&Path>, width: u32, height: u32) -> ConvertResult<RgbImage> {
    match source {
        None => Ok(RgbImage::from_pixel(width, height, PLACEHOLDER_COLOR)),
        Some(path) => {
            let image = decode(path)?;
            log::debug!(
                "Resizing {} from {}x{} to {}x{}",
                path.display(),
                image.width(),
                image.height(),
                width,
                height
            );
            // Stretch to the exact frame size; no letterboxing or cropping.
            Ok(image.resize_exact(width, height, FilterType::Lanczos3).to_rgb8())
        }
    }
}

/// Render the still frame and write it to a new temporary JPEG.
///
/// The returned path deletes the file when dropped. A temp file passed in as
/// `source` is not touched; the caller drops it once this returns.
pub fn prepare(source: Option<&Path>, width: u32, height: u32) -> ConvertResult<TempPath> {
    let frame = render(source, width, height)?;

    let output = tempfile::Builder::new()
        .prefix("frame_")
        .suffix(".jpg")
        .tempfile()
        .map_err(|e| ConvertError::io("Failed to create temporary image", e))?
        .into_temp_path();

    frame.save_with_format(&output, ImageFormat::Jpeg)?;
    Ok(output)
}
