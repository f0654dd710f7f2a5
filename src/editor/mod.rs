// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor logic: crop dragging, playback synchronization and keyframe
//! recording, tied together by `EditorState`.

pub mod drag;
pub mod recorder;
pub mod state;
pub mod sync;
