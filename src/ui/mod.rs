// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the converter window.

pub mod dialog;
pub mod file_list;
pub mod settings_panel;
pub mod toolbar;
