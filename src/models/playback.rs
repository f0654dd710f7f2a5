// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback parameters mirrored by the editor.

/// Rates offered by the playback-rate selector.
pub const PLAYBACK_RATES: [f32; 4] = [0.5, 1.0, 1.5, 2.0];

/// Editor-side view of the primary surface's playback.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub playing: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds; set once when metadata loads.
    pub duration: f64,
    /// 0.0 to 1.0.
    pub volume: f32,
    pub muted: bool,
    pub playback_rate: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
        }
    }
}

/// Format seconds as `MM:SS` for the time readout.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
