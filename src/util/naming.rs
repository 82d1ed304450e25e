// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Output file naming.
//!
//! This module derives the `.mp4` file name for a source track according to
//! the selected naming scheme, and resolves the directory it is written to.

use crate::error::{ConvertError, ConvertResult};
use crate::models::settings::FilenameScheme;
use chrono::{DateTime, Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Timestamp format used for file name suffixes.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format an output file name from explicit timestamps.
///
/// `modified` is only consulted for [`FilenameScheme::OriginalModified`] and
/// `now` only for [`FilenameScheme::OriginalNow`].
pub fn format_file_name(
    stem: &str,
    scheme: FilenameScheme,
    modified: NaiveDateTime,
    now: NaiveDateTime,
) -> String {
    match scheme {
        FilenameScheme::Original => format!("{}.mp4", stem),
        FilenameScheme::OriginalModified => {
            format!("{}_{}.mp4", stem, modified.format(TIMESTAMP_FORMAT))
        }
        FilenameScheme::OriginalNow => format!("{}_{}.mp4", stem, now.format(TIMESTAMP_FORMAT)),
    }
}

/// Generate the output file name for `source`.
pub fn output_file_name(source: &Path, scheme: FilenameScheme) -> ConvertResult<String> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| ConvertError::InvalidSource(source.to_path_buf()))?;

    let now = Local::now().naive_local();
    let modified = match scheme {
        FilenameScheme::OriginalModified => {
            let mtime = std::fs::metadata(source)
                .and_then(|m| m.modified())
                .map_err(|e| {
                    ConvertError::io(format!("Failed to read modification time of {}", source.display()), e)
                })?;
            DateTime::<Local>::from(mtime).naive_local()
        }
        _ => now,
    };

    Ok(format_file_name(&stem, scheme, modified, now))
}

/// Directory the video for `source` is written to: the configured folder if
/// set, otherwise the source's own directory.
pub fn output_dir(source: &Path, output_folder: &str) -> PathBuf {
    if !output_folder.trim().is_empty() {
        return PathBuf::from(output_folder);
    }
    source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Whether `path` has an `.mp3` extension (any case).
pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
