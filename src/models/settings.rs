// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Conversion settings.
//!
//! This module defines the user-selectable options (aspect ratio, quality,
//! output folder and file naming) together with the fixed resolution table
//! they map to.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frame shape of the generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    pub fn all() -> &'static [AspectRatio] {
        &[AspectRatio::Square, AspectRatio::Widescreen]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
        }
    }

    /// Pixel dimensions (width, height) for this aspect ratio at `quality`.
    pub fn dimensions(&self, quality: Quality) -> (u32, u32) {
        match (self, quality) {
            (AspectRatio::Square, Quality::P1080) => (1080, 1080),
            (AspectRatio::Square, Quality::P720) => (720, 720),
            (AspectRatio::Square, Quality::P480) => (480, 480),
            (AspectRatio::Square, Quality::P360) => (360, 360),
            (AspectRatio::Widescreen, Quality::P1080) => (1920, 1080),
            (AspectRatio::Widescreen, Quality::P720) => (1280, 720),
            (AspectRatio::Widescreen, Quality::P480) => (854, 480),
            (AspectRatio::Widescreen, Quality::P360) => (640, 360),
            (_, Quality::Unrecognised) => (720, 720),
        }
    }

    /// Parse a stored label. Only `"1:1"` is square; every other label is
    /// treated as widescreen.
    pub fn from_label(label: &str) -> Self {
        match label {
            "1:1" => AspectRatio::Square,
            "16:9" => AspectRatio::Widescreen,
            _ => {
                log::warn!("Unknown video format '{}', using 16:9", label);
                AspectRatio::Widescreen
            }
        }
    }
}

/// Vertical resolution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Quality {
    #[serde(rename = "1080p")]
    P1080,
    #[default]
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
    /// Label not in the table, loaded from a hand-edited config file.
    /// Always renders at 720×720 whatever the aspect ratio.
    #[serde(rename = "unrecognised")]
    Unrecognised,
}

impl Quality {
    pub fn all() -> &'static [Quality] {
        &[Quality::P1080, Quality::P720, Quality::P480, Quality::P360]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::Unrecognised => "unrecognised",
        }
    }

    /// Parse a quality label. Anything outside the table becomes
    /// [`Quality::Unrecognised`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            log::warn!("Unknown quality '{}', using 720x720", label);
            Quality::Unrecognised
        })
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1080p" => Ok(Quality::P1080),
            "720p" => Ok(Quality::P720),
            "480p" => Ok(Quality::P480),
            "360p" => Ok(Quality::P360),
            _ => Err(format!("Unknown quality: {}", s)),
        }
    }
}

/// How the output file name is derived from the source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FilenameScheme {
    /// `song.mp3` -> `song.mp4`
    #[default]
    #[serde(rename = "original")]
    Original,
    /// Source file's last-modified time appended.
    #[serde(rename = "original_date")]
    OriginalModified,
    /// Current wall-clock time appended. Labelled "creation" in the config
    /// file, but it is the time of conversion, not of file creation.
    #[serde(rename = "original_creation")]
    OriginalNow,
}

impl FilenameScheme {
    pub fn all() -> &'static [FilenameScheme] {
        &[
            FilenameScheme::Original,
            FilenameScheme::OriginalModified,
            FilenameScheme::OriginalNow,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilenameScheme::Original => "original",
            FilenameScheme::OriginalModified => "original_date",
            FilenameScheme::OriginalNow => "original_creation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FilenameScheme::Original => "song.mp3 → song.mp4",
            FilenameScheme::OriginalModified => "Appends the MP3's last-modified time",
            FilenameScheme::OriginalNow => "Appends the time of conversion (not the file's creation time)",
        }
    }
}

impl FromStr for FilenameScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "original" => Ok(FilenameScheme::Original),
            "original_date" => Ok(FilenameScheme::OriginalModified),
            "original_creation" => Ok(FilenameScheme::OriginalNow),
            _ => Err(format!("Unknown filename format: {}", s)),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FilenameScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deserialize a label via `FromStr`, substituting the type's default for
/// labels that do not parse.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String> + Default,
{
    let label = String::deserialize(deserializer)?;
    Ok(label.parse().unwrap_or_else(|e: String| {
        log::warn!("{}; using default", e);
        T::default()
    }))
}

fn lenient_aspect<'de, D>(deserializer: D) -> Result<AspectRatio, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(AspectRatio::from_label(&label))
}

fn lenient_quality<'de, D>(deserializer: D) -> Result<Quality, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(Quality::from_label(&label))
}

/// User settings, persisted to the config file as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output directory; empty means "next to each source file".
    pub output_folder: String,
    #[serde(deserialize_with = "lenient_aspect")]
    pub video_format: AspectRatio,
    #[serde(deserialize_with = "lenient")]
    pub filename_format: FilenameScheme,
    #[serde(deserialize_with = "lenient_quality")]
    pub quality: Quality,
}

impl Settings {
    /// Target video dimensions for the current aspect ratio and quality.
    pub fn dimensions(&self) -> (u32, u32) {
        self.video_format.dimensions(self.quality)
    }
}
