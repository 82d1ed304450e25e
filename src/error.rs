// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-file conversion errors.

use std::path::PathBuf;
use thiserror::Error;

/// Reason a single file could not be converted.
///
/// The `Display` output is what ends up in the batch summary, so every
/// variant renders as a short, user-readable sentence.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0} not found. Please install FFmpeg.")]
    ToolMissing(&'static str),

    #[error("Could not read audio duration: {0}")]
    Probe(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Not a file path: {}", .0.display())]
    InvalidSource(PathBuf),
}

impl ConvertError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ConvertError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
