// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Samples the crop region on every primary time update.

use crate::models::crop::CropRect;
use crate::models::keyframe::{Keyframe, RecordingSession};
use crate::models::playback::PlaybackState;

/// Appends keyframes to a recording session while cropping is active.
#[derive(Debug, Clone, Default)]
pub struct KeyframeRecorder {
    session: RecordingSession,
    enabled: bool,
}

impl KeyframeRecorder {
    pub fn new(enabled: bool) -> Self {
        Self {
            session: RecordingSession::new(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    /// Record a keyframe for the time update at `playback.current_time`.
    ///
    /// Returns whether a keyframe was appended. Nothing is recorded when
    /// cropping is off or the sample repeats the last timestamp.
    pub fn on_time_update(
        &mut self,
        cropping: bool,
        rect: &CropRect,
        playback: &PlaybackState,
    ) -> bool {
        if !self.enabled || !cropping {
            return false;
        }

        let keyframe = Keyframe {
            time_stamp: playback.current_time,
            coordinates: rect.corners(),
            volume: playback.volume,
            playback_rate: playback.playback_rate,
        };

        let appended = self.session.push(keyframe);
        if appended {
            log::debug!(
                "Keyframe {} at {:.3}s: {:?}",
                self.session.len(),
                keyframe.time_stamp,
                keyframe.coordinates
            );
        }
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t: f64) -> PlaybackState {
        PlaybackState {
            current_time: t,
            volume: 0.6,
            playback_rate: 1.5,
            ..PlaybackState::default()
        }
    }

    fn rect() -> CropRect {
        CropRect { x: 150.0, y: 0.0, width: 600.0, height: 600.0 }
    }

    #[test]
    fn test_duplicate_time_update_records_once() {
        let mut recorder = KeyframeRecorder::new(true);
        assert!(recorder.on_time_update(true, &rect(), &at(2.0)));
        assert!(!recorder.on_time_update(true, &rect(), &at(2.0)));

        let keyframes = recorder.session().keyframes();
        assert_eq!(keyframes.len(), 1);
        assert_eq!(keyframes[0].time_stamp, 2.0);
        assert_eq!(keyframes[0].coordinates, [150.0, 0.0, 750.0, 600.0]);
        assert_eq!(keyframes[0].volume, 0.6);
        assert_eq!(keyframes[0].playback_rate, 1.5);
    }

    #[test]
    fn test_nothing_recorded_without_cropper() {
        let mut recorder = KeyframeRecorder::new(true);
        assert!(!recorder.on_time_update(false, &rect(), &at(1.0)));
        assert!(recorder.session().is_empty());
    }

    #[test]
    fn test_disabled_recorder_ignores_updates() {
        let mut recorder = KeyframeRecorder::new(false);
        assert!(!recorder.on_time_update(true, &rect(), &at(1.0)));
        assert!(recorder.session().is_empty());
    }

    #[test]
    fn test_playback_run_is_strictly_increasing() {
        let mut recorder = KeyframeRecorder::new(true);
        for t in [0.0, 0.25, 0.25, 0.5, 0.5, 0.5, 0.75, 1.0] {
            recorder.on_time_update(true, &rect(), &at(t));
        }
        let times: Vec<f64> = recorder
            .session()
            .keyframes()
            .iter()
            .map(|k| k.time_stamp)
            .collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
