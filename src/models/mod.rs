// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for conversion settings and batch runs.

pub mod batch;
pub mod settings;
