// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Embedded cover art extraction.
//!
//! Reads the ID3 tag of an MP3 and copies its front-cover picture into a
//! temporary file. A missing tag or missing cover is the common case and is
//! reported as `None`, never as an error.

use id3::frame::PictureType;
use id3::TagLike;
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;

fn ext_from_mime(mime: &str) -> &'static str {
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => ".png",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        "image/gif" => ".gif",
        _ => ".jpg",
    }
}

/// Extract the front cover of `audio_path` into a self-deleting temp file.
pub fn extract_front_cover(audio_path: &Path) -> Option<TempPath> {
    let tag = match id3::Tag::read_from_path(audio_path) {
        Ok(tag) => tag,
        Err(e) => {
            log::debug!("No readable ID3 tag in {}: {}", audio_path.display(), e);
            return None;
        }
    };

    let Some(cover) = tag
        .pictures()
        .find(|p| p.picture_type == PictureType::CoverFront)
    else {
        log::debug!("No front cover in {}", audio_path.display());
        return None;
    };

    let written = tempfile::Builder::new()
        .prefix("cover_")
        .suffix(ext_from_mime(&cover.mime_type))
        .tempfile()
        .and_then(|mut file| {
            file.write_all(&cover.data)?;
            file.flush()?;
            Ok(file.into_temp_path())
        });

    match written {
        Ok(path) => {
            log::debug!(
                "Extracted {} byte cover from {} to {}",
                cover.data.len(),
                audio_path.display(),
                path.display()
            );
            Some(path)
        }
        Err(e) => {
            log::warn!("Failed to write cover art to a temp file: {}", e);
            None
        }
    }
}
