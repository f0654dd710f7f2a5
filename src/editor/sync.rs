// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keeps the primary and preview playback surfaces in agreement.
//!
//! Every control goes to the primary surface and, while a preview is
//! attached, to the preview as well. Nothing is queued for a detached
//! preview: a newly attached one starts from whatever state it was built
//! with.

use crate::io::media::{MediaSurface, SurfaceEvent};
use crate::models::playback::PlaybackState;
use std::time::Duration;

/// Which surface an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    Primary,
    Preview,
}

pub struct PlaybackSynchronizer {
    primary: Box<dyn MediaSurface>,
    preview: Option<Box<dyn MediaSurface>>,
    state: PlaybackState,
}

impl PlaybackSynchronizer {
    /// Take ownership of a loaded primary surface.
    pub fn new(primary: Box<dyn MediaSurface>) -> Self {
        let state = PlaybackState {
            playing: primary.is_playing(),
            current_time: primary.current_time(),
            duration: primary.duration(),
            volume: primary.volume(),
            muted: primary.muted(),
            playback_rate: primary.playback_rate(),
        };
        Self {
            primary,
            preview: None,
            state,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[cfg(test)]
    pub fn primary(&self) -> &dyn MediaSurface {
        &*self.primary
    }

    pub fn preview(&self) -> Option<&dyn MediaSurface> {
        self.preview.as_deref()
    }

    pub fn attach_preview(&mut self, surface: Box<dyn MediaSurface>) {
        self.preview = Some(surface);
    }

    pub fn detach_preview(&mut self) {
        self.preview = None;
    }

    /// Apply `f` to the primary surface, then to the preview if attached.
    fn apply(&mut self, f: impl Fn(&mut Box<dyn MediaSurface>)) {
        f(&mut self.primary);
        if let Some(preview) = self.preview.as_mut() {
            f(preview);
        }
    }

    pub fn toggle_play(&mut self) {
        if self.state.playing {
            self.apply(|s| s.pause());
        } else {
            self.apply(|s| s.play());
        }
        self.state.playing = !self.state.playing;
        // Playing from the end rewinds the surfaces
        self.state.current_time = self.primary.current_time();
    }

    pub fn seek(&mut self, time: f64) {
        self.apply(|s| s.seek(time));
        self.state.current_time = self.primary.current_time();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.apply(|s| s.set_volume(volume));
        self.state.volume = self.primary.volume();
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.state.muted;
        self.apply(|s| s.set_muted(muted));
        self.state.muted = muted;
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        self.apply(|s| s.set_playback_rate(rate));
        self.state.playback_rate = self.primary.playback_rate();
    }

    /// Advance both surfaces and return their events.
    ///
    /// Primary time updates are mirrored onto the preview's clock and the
    /// end of media pauses both.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<(SurfaceRole, SurfaceEvent)> {
        let primary_events = self.primary.advance(elapsed);
        let preview_events = self
            .preview
            .as_mut()
            .map(|p| p.advance(elapsed))
            .unwrap_or_default();

        for event in &primary_events {
            match event {
                SurfaceEvent::TimeUpdate(t) => {
                    self.state.current_time = *t;
                    if let Some(preview) = self.preview.as_mut() {
                        preview.seek(*t);
                    }
                }
                SurfaceEvent::Ended => {
                    self.state.playing = false;
                    if let Some(preview) = self.preview.as_mut() {
                        preview.pause();
                    }
                }
                _ => {}
            }
        }

        primary_events
            .into_iter()
            .map(|e| (SurfaceRole::Primary, e))
            .chain(preview_events.into_iter().map(|e| (SurfaceRole::Preview, e)))
            .collect()
    }
}
