// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the FlipCrop editor.

pub mod canvas;
pub mod preview;
pub mod timeline;
pub mod toolbar;
