// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for settings, cover art, still frames and FFmpeg.

pub mod artwork;
pub mod config;
pub mod ffmpeg;
pub mod still_image;
