// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings persistence.
//!
//! Settings live in a flat JSON file. Loading never fails: a missing or
//! unreadable file yields the defaults. Saving is best-effort.

use crate::models::settings::Settings;
use anyhow::Result;
use std::path::Path;

/// Config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "config.json";

/// Read settings from `path`.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&json)?;
    Ok(settings)
}

/// Write settings to `path` as pretty-printed JSON.
pub fn write_settings(settings: &Settings, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load settings, substituting defaults if the file is missing or invalid.
pub fn load_or_default(path: &Path) -> Settings {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Settings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}; using defaults", path.display(), e);
            Settings::default()
        }
    }
}

/// Save settings, logging and discarding any error.
pub fn save_quietly(settings: &Settings, path: &Path) {
    match write_settings(settings, path) {
        Ok(()) => log::debug!("Saved settings to {}", path.display()),
        Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{AspectRatio, FilenameScheme, Quality};

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let settings = Settings {
            output_folder: "/home/user/Videos".to_string(),
            video_format: AspectRatio::Widescreen,
            filename_format: FilenameScheme::OriginalModified,
            quality: Quality::P480,
        };

        save_quietly(&settings, &path);
        assert_eq!(load_or_default(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        assert_eq!(load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_reads_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
  "output_folder": "",
  "video_format": "16:9",
  "filename_format": "original",
  "quality": "360p"
}"#,
        )
        .unwrap();

        let settings = load_or_default(&path);
        assert_eq!(settings.video_format, AspectRatio::Widescreen);
        assert_eq!(settings.quality, Quality::P360);
        assert_eq!(settings.dimensions(), (640, 360));
    }

    #[test]
    fn test_unknown_labels_use_legacy_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"video_format": "16:9", "quality": "1080P"}"#).unwrap();

        let settings = load_or_default(&path);
        assert_eq!(settings.quality, Quality::Unrecognised);
        assert_eq!(settings.dimensions(), (720, 720));

        std::fs::write(&path, r#"{"video_format": "21:9", "quality": "360p"}"#).unwrap();
        assert_eq!(load_or_default(&path).dimensions(), (640, 360));
    }

    #[test]
    fn test_save_to_unwritable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(CONFIG_FILE);
        save_quietly(&Settings::default(), &path);
        assert!(!path.exists());
    }
}
