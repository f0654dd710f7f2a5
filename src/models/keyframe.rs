// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recorded crop keyframes.

use serde::{Deserialize, Serialize};

/// One sample of the crop region and playback parameters at a media time.
///
/// Field order and names match the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Media time in seconds.
    pub time_stamp: f64,
    /// Crop corners `[x1, y1, x2, y2]` in container pixels.
    pub coordinates: [f32; 4],
    pub volume: f32,
    pub playback_rate: f32,
}

/// Ordered, append-only keyframe sequence for one editor instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSession {
    keyframes: Vec<Keyframe>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `keyframe` unless its timestamp equals the last one recorded.
    ///
    /// Returns whether the keyframe was appended.
    pub fn push(&mut self, keyframe: Keyframe) -> bool {
        match self.keyframes.last() {
            Some(last) if last.time_stamp == keyframe.time_stamp => false,
            _ => {
                self.keyframes.push(keyframe);
                true
            }
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyframe(t: f64) -> Keyframe {
        Keyframe {
            time_stamp: t,
            coordinates: [0.0, 0.0, 10.0, 10.0],
            volume: 1.0,
            playback_rate: 1.0,
        }
    }

    #[test]
    fn test_push_drops_consecutive_duplicates() {
        let mut session = RecordingSession::new();
        assert!(session.push(keyframe(2.0)));
        assert!(!session.push(keyframe(2.0)));
        assert!(session.push(keyframe(2.25)));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_push_keeps_non_consecutive_repeat() {
        // A seek back can revisit an earlier time; only the immediate
        // predecessor is compared.
        let mut session = RecordingSession::new();
        session.push(keyframe(1.0));
        session.push(keyframe(3.0));
        assert!(session.push(keyframe(1.0)));
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(keyframe(0.5)).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 4);
        for key in ["timeStamp", "coordinates", "volume", "playbackRate"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }
}
