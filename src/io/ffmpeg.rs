// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FFmpeg integration.
//!
//! Locates the `ffmpeg`/`ffprobe` executables, probes audio duration and
//! muxes a still image with an audio track into an H.264/AAC MP4.

use crate::error::{ConvertError, ConvertResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Frame rate of the generated video. The picture never changes, so one
/// frame per second is enough.
pub const STILL_FPS: u32 = 1;

/// Lines of FFmpeg stderr kept in error messages.
const STDERR_TAIL_LINES: usize = 5;

fn common_locations(name: &str) -> Vec<PathBuf> {
    let dirs: &[&str] = if cfg!(target_os = "macos") {
        &["/usr/local/bin", "/opt/homebrew/bin", "/opt/local/bin"]
    } else if cfg!(target_os = "windows") {
        &["C:\\ffmpeg\\bin", "C:\\Program Files\\ffmpeg\\bin"]
    } else {
        &["/usr/bin", "/usr/local/bin"]
    };

    let file = if cfg!(target_os = "windows") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    dirs.iter().map(|d| Path::new(d).join(&file)).collect()
}

fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name)
        .ok()
        .or_else(|| common_locations(name).into_iter().find(|p| p.exists()))
}

/// Paths to the FFmpeg executables, as found on this machine.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
}

impl Toolchain {
    /// Search PATH and common install locations.
    pub fn locate() -> Self {
        let toolchain = Self {
            ffmpeg: find_executable("ffmpeg"),
            ffprobe: find_executable("ffprobe"),
        };

        match (&toolchain.ffmpeg, &toolchain.ffprobe) {
            (Some(ffmpeg), Some(ffprobe)) => {
                log::info!("Using {} and {}", ffmpeg.display(), ffprobe.display())
            }
            _ => log::warn!("FFmpeg toolchain incomplete: {:?}", toolchain),
        }

        toolchain
    }

    pub fn is_available(&self) -> bool {
        self.ffmpeg.is_some() && self.ffprobe.is_some()
    }

    /// User-facing warning when a tool is missing.
    pub fn missing_message(&self) -> Option<String> {
        match (&self.ffmpeg, &self.ffprobe) {
            (Some(_), Some(_)) => None,
            (None, _) => Some("FFmpeg not found. Please install FFmpeg to convert files.".to_string()),
            (Some(_), None) => Some("FFprobe not found. Please install FFmpeg to convert files.".to_string()),
        }
    }

    fn ffmpeg(&self) -> ConvertResult<&Path> {
        self.ffmpeg.as_deref().ok_or(ConvertError::ToolMissing("FFmpeg"))
    }

    fn ffprobe(&self) -> ConvertResult<&Path> {
        self.ffprobe.as_deref().ok_or(ConvertError::ToolMissing("FFprobe"))
    }

    /// Duration of an audio file in seconds.
    pub fn probe_duration(&self, audio: &Path) -> ConvertResult<f64> {
        let mut cmd = command(self.ffprobe()?);
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(audio);

        let output = run(cmd, "FFprobe")?;
        if !output.status.success() {
            return Err(ConvertError::Probe(stderr_tail(&output)));
        }

        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }

    /// Encode `image` shown for `duration` seconds with `audio` as the
    /// soundtrack. Existing files at `output` are overwritten.
    pub fn mux_still_image(
        &self,
        image: &Path,
        audio: &Path,
        duration: f64,
        output: &Path,
    ) -> ConvertResult<()> {
        let fps = STILL_FPS.to_string();
        let length = format!("{:.3}", duration);
        let mut cmd = command(self.ffmpeg()?);
        cmd.args(["-y", "-loop", "1", "-framerate", fps.as_str(), "-i"])
            .arg(image)
            .arg("-i")
            .arg(audio)
            .args([
                "-map",
                "0:v:0",
                "-map",
                "1:a:0",
                "-c:v",
                "libx264",
                "-tune",
                "stillimage",
                "-pix_fmt",
                "yuv420p",
                "-r",
                fps.as_str(),
                "-c:a",
                "aac",
                "-t",
                length.as_str(),
                "-movflags",
                "+faststart",
            ])
            .arg(output);

        log::debug!("Running {:?}", cmd);

        let result = run(cmd, "FFmpeg")?;
        if !result.status.success() {
            return Err(ConvertError::Encode(stderr_tail(&result)));
        }
        Ok(())
    }
}

fn command(program: &Path) -> Command {
    let mut cmd = Command::new(program);
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn run(mut cmd: Command, name: &str) -> ConvertResult<Output> {
    cmd.output()
        .map_err(|e| ConvertError::io(format!("Failed to run {}", name), e))
}

/// Parse ffprobe's `format=duration` output.
fn parse_duration(stdout: &str) -> ConvertResult<f64> {
    let text = stdout.trim();
    match text.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(secs),
        _ => Err(ConvertError::Probe(format!("unexpected duration '{}'", text))),
    }
}

/// Last few non-empty stderr lines, which is where FFmpeg puts the reason.
fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    let tail = lines[start..].join("\n");

    if tail.is_empty() {
        format!("exited with code {:?}", output.status.code())
    } else {
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12.345000\n").unwrap(), 12.345);
        assert!(parse_duration("N/A").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0.000000").is_err());
    }

    #[test]
    fn test_missing_tools_are_reported() {
        let toolchain = Toolchain::default();
        assert!(!toolchain.is_available());
        assert!(toolchain.missing_message().unwrap().contains("FFmpeg"));

        let err = toolchain.probe_duration(Path::new("song.mp3")).unwrap_err();
        assert!(matches!(err, ConvertError::ToolMissing("FFprobe")));

        let err = toolchain
            .mux_still_image(Path::new("a.jpg"), Path::new("a.mp3"), 1.0, Path::new("a.mp4"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::ToolMissing("FFmpeg")));
    }

    #[test]
    fn test_common_locations_named_for_platform() {
        let paths = common_locations("ffmpeg");
        assert!(!paths.is_empty());
        for path in paths {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(name.starts_with("ffmpeg"));
        }
    }
}
