// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media sources and recording export.

pub mod frames;
pub mod media;
pub mod serialization;
