// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyframe recording export.
//!
//! This module writes the recorded keyframes as a pretty-printed JSON
//! array and reads such documents back.

use crate::models::keyframe::Keyframe;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Fixed name of the exported recording.
pub const EXPORT_FILE_NAME: &str = "video-editor-recording.json";

/// Serialize keyframes to a JSON array with 2-space indentation.
pub fn to_json(keyframes: &[Keyframe]) -> Result<String> {
    Ok(serde_json::to_string_pretty(keyframes)?)
}

/// Export keyframes to a JSON file.
pub fn export_json(keyframes: &[Keyframe], path: &Path) -> Result<()> {
    let json = to_json(keyframes)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import keyframes from a JSON file.
pub fn import_json(path: &Path) -> Result<Vec<Keyframe>> {
    let json = std::fs::read_to_string(path)?;
    let keyframes = serde_json::from_str(&json)?;
    Ok(keyframes)
}

/// Write the recording as `EXPORT_FILE_NAME` in `dir` and read it back.
///
/// Returns the written path and the number of keyframes the file holds.
pub fn export_recording(keyframes: &[Keyframe], dir: &Path) -> Result<(PathBuf, usize)> {
    let path = dir.join(EXPORT_FILE_NAME);
    export_json(keyframes, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    let written = import_json(&path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;
    Ok((path, written.len()))
}
