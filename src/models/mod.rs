// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for crop geometry, playback and recorded keyframes.

pub mod crop;
pub mod keyframe;
pub mod playback;
