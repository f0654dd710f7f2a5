// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media sources and playback surfaces.
//!
//! This module probes video files for their metadata, picks the first
//! playable source among alternative encodings, and provides the playback
//! surfaces the editor drives. Decoding frames is not a concern here; see
//! `io::frames`.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Wall-clock spacing of time updates while playing.
pub const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Container formats the editor will try to open.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "ogv", "ogg", "mov", "mkv"];

/// Metadata of a probed media source.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub source: String,
    /// Seconds.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

/// Notification emitted by a playback surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    LoadedMetadata(MediaInfo),
    TimeUpdate(f64),
    Ended,
    Error(String),
}

/// A playback surface the editor can control.
///
/// Setters take effect immediately; notifications they cause (such as the
/// time update after a seek) are delivered by the next `advance`.
pub trait MediaSurface {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: f32);

    fn is_playing(&self) -> bool;
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn volume(&self) -> f32;
    fn muted(&self) -> bool;
    fn playback_rate(&self) -> f32;

    /// Advance the surface clock by `elapsed` wall time and collect pending events.
    fn advance(&mut self, elapsed: Duration) -> Vec<SurfaceEvent>;
}

/// Playback surface driven by elapsed wall time over a known duration.
#[derive(Debug, Clone)]
pub struct ClockSurface {
    duration: f64,
    current_time: f64,
    playing: bool,
    volume: f32,
    muted: bool,
    playback_rate: f32,
    since_update: Duration,
    pending: Vec<SurfaceEvent>,
}

impl ClockSurface {
    pub fn new(info: &MediaInfo) -> Self {
        Self {
            duration: info.duration.max(0.0),
            current_time: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            since_update: Duration::ZERO,
            pending: Vec::new(),
        }
    }
}

impl MediaSurface for ClockSurface {
    fn play(&mut self) {
        // Playing from the end starts over, reported like a seek
        if self.current_time >= self.duration {
            self.current_time = 0.0;
            self.since_update = Duration::ZERO;
            self.pending.push(SurfaceEvent::TimeUpdate(0.0));
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration);
        self.since_update = Duration::ZERO;
        self.pending.push(SurfaceEvent::TimeUpdate(self.current_time));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f32) {
        if rate > 0.0 {
            self.playback_rate = rate;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<SurfaceEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if !self.playing {
            return events;
        }

        let step = elapsed.as_secs_f64() * self.playback_rate as f64;
        self.current_time = (self.current_time + step).min(self.duration);
        self.since_update += elapsed;

        if self.current_time >= self.duration {
            self.playing = false;
            self.since_update = Duration::ZERO;
            events.push(SurfaceEvent::TimeUpdate(self.current_time));
            events.push(SurfaceEvent::Ended);
        } else if self.since_update >= TIME_UPDATE_INTERVAL {
            self.since_update = Duration::ZERO;
            events.push(SurfaceEvent::TimeUpdate(self.current_time));
        }
        events
    }
}

/// Whether the source names a container format the editor can open.
pub fn is_supported_source(source: &str) -> bool {
    // Ignore URL queries and fragments when looking at the extension
    let path = source.split(['?', '#']).next().unwrap_or(source);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read duration and frame size of a media source using ffprobe.
pub fn probe(source: &str) -> Result<MediaInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "-select_streams",
            "v:0",
        ])
        .arg(source)
        .output()
        .context("Failed to run ffprobe")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("ffprobe failed for {}: {}", source, stderr.trim()));
    }

    parse_probe_output(source, &String::from_utf8_lossy(&output.stdout))
}

/// Parse the JSON printed by `ffprobe -print_format json -show_format -show_streams`.
pub fn parse_probe_output(source: &str, json: &str) -> Result<MediaInfo> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse ffprobe output")?;

    let stream = value["streams"]
        .as_array()
        .and_then(|s| s.first())
        .ok_or_else(|| anyhow!("No video stream found in {}", source))?;

    let width = stream["width"].as_u64().unwrap_or(0) as u32;
    let height = stream["height"].as_u64().unwrap_or(0) as u32;

    // Format duration is more reliable than the stream's
    let duration = value["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| stream["duration"].as_str().and_then(|s| s.parse::<f64>().ok()))
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| anyhow!("No duration reported for {}", source))?;

    Ok(MediaInfo {
        source: source.to_string(),
        duration,
        width,
        height,
    })
}

/// Pick the first supported source that `probe_fn` accepts.
pub fn select_source<F>(candidates: &[String], mut probe_fn: F) -> Result<MediaInfo>
where
    F: FnMut(&str) -> Result<MediaInfo>,
{
    let mut last_error = None;
    for candidate in candidates {
        if !is_supported_source(candidate) {
            log::warn!("Skipping unsupported source: {}", candidate);
            continue;
        }
        match probe_fn(candidate) {
            Ok(info) => return Ok(info),
            Err(e) => {
                log::warn!("Cannot use source {}: {:#}", candidate, e);
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => e.context("No playable video source"),
        None => anyhow!("No supported video source among {:?}", candidates),
    })
}

/// Probe the candidates on a background thread.
///
/// The receiver yields exactly one `LoadedMetadata` or `Error` event.
pub fn spawn_probe(candidates: Vec<String>) -> Receiver<SurfaceEvent> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let event = match select_source(&candidates, probe) {
            Ok(info) => {
                log::info!(
                    "Probed {} ({}x{}, {:.2}s)",
                    info.source,
                    info.width,
                    info.height,
                    info.duration
                );
                SurfaceEvent::LoadedMetadata(info)
            }
            Err(e) => SurfaceEvent::Error(format!("{:#}", e)),
        };
        let _ = sender.send(event);
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(duration: f64) -> MediaInfo {
        MediaInfo {
            source: "clip.mp4".to_string(),
            duration,
            width: 1920,
            height: 1080,
        }
    }

    #[test]
    fn test_time_updates_every_quarter_second() {
        let mut surface = ClockSurface::new(&info(10.0));
        surface.play();

        let mut updates = Vec::new();
        for _ in 0..60 {
            // About one second of 60 Hz frames
            for event in surface.advance(Duration::from_micros(16_667)) {
                if let SurfaceEvent::TimeUpdate(t) = event {
                    updates.push(t);
                }
            }
        }

        assert!((3..=4).contains(&updates.len()), "got {:?}", updates);
        assert!(updates.windows(2).all(|w| w[0] < w[1]));
        assert!((surface.current_time() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_rate_scales_media_time() {
        let mut surface = ClockSurface::new(&info(10.0));
        surface.set_playback_rate(2.0);
        surface.play();
        surface.advance(Duration::from_millis(500));
        assert!((surface.current_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seek_queues_time_update() {
        let mut surface = ClockSurface::new(&info(10.0));
        surface.seek(4.5);
        assert_eq!(surface.current_time(), 4.5);
        assert_eq!(surface.advance(Duration::ZERO), vec![SurfaceEvent::TimeUpdate(4.5)]);

        surface.seek(99.0);
        assert_eq!(surface.current_time(), 10.0);
    }

    #[test]
    fn test_end_of_media_pauses() {
        let mut surface = ClockSurface::new(&info(1.0));
        surface.play();
        let events = surface.advance(Duration::from_secs(2));
        assert_eq!(events, vec![SurfaceEvent::TimeUpdate(1.0), SurfaceEvent::Ended]);
        assert!(!surface.is_playing());

        // Playing again restarts from the beginning and says so
        surface.play();
        assert_eq!(surface.current_time(), 0.0);
        assert_eq!(surface.advance(Duration::ZERO), vec![SurfaceEvent::TimeUpdate(0.0)]);
    }

    #[test]
    fn test_rate_two_update_cadence() {
        let mut surface = ClockSurface::new(&info(10.0));
        surface.set_playback_rate(2.0);
        surface.play();

        let mut updates = 0;
        for _ in 0..60 {
            updates += surface
                .advance(Duration::from_micros(16_667))
                .iter()
                .filter(|e| matches!(e, SurfaceEvent::TimeUpdate(_)))
                .count();
        }

        // Cadence follows wall time, so the rate does not change the count
        assert!((3..=4).contains(&updates), "got {}", updates);
        assert!((surface.current_time() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_volume_is_clamped_and_rate_must_be_positive() {
        let mut surface = ClockSurface::new(&info(1.0));
        surface.set_volume(1.7);
        assert_eq!(surface.volume(), 1.0);
        surface.set_playback_rate(0.0);
        assert_eq!(surface.playback_rate(), 1.0);
    }

    #[test]
    fn test_supported_sources() {
        assert!(is_supported_source("movie.mp4"));
        assert!(is_supported_source("/videos/Clip.WEBM"));
        assert!(is_supported_source(
            "https://example.com/BigBuckBunny.mp4?token=abc#t=10"
        ));
        assert!(!is_supported_source("notes.txt"));
        assert!(!is_supported_source("no_extension"));
    }

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{
            "streams": [{"width": 1280, "height": 720, "duration": "9.50"}],
            "format": {"duration": "10.000000"}
        }"#;
        let parsed = parse_probe_output("a.mp4", json).unwrap();
        assert_eq!(parsed.width, 1280);
        assert_eq!(parsed.height, 720);
        assert_eq!(parsed.duration, 10.0);

        let stream_only = r#"{"streams": [{"width": 2, "height": 2, "duration": "3.5"}], "format": {}}"#;
        assert_eq!(parse_probe_output("a.mp4", stream_only).unwrap().duration, 3.5);

        assert!(parse_probe_output("a.mp4", r#"{"streams": [], "format": {}}"#).is_err());
    }

    #[test]
    fn test_select_source_uses_first_playable() {
        let candidates = vec![
            "clip.avi".to_string(),
            "clip.webm".to_string(),
            "clip.mp4".to_string(),
        ];
        let mut probed = Vec::new();
        let selected = select_source(&candidates, |s| {
            probed.push(s.to_string());
            if s.ends_with(".webm") {
                Err(anyhow!("decoder missing"))
            } else {
                Ok(MediaInfo { source: s.to_string(), ..info(5.0) })
            }
        })
        .unwrap();

        assert_eq!(selected.source, "clip.mp4");
        assert_eq!(probed, vec!["clip.webm", "clip.mp4"]);
    }

    #[test]
    fn test_select_source_fails_without_candidates() {
        assert!(select_source(&[], |_| Ok(info(1.0))).is_err());
        assert!(select_source(&["a.txt".to_string()], |_| Ok(info(1.0))).is_err());
    }
}
