// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor state and its update operations.
//!
//! `EditorState` owns everything the editor knows: the lifecycle phase,
//! the crop geometry, the drag gesture, the playback surfaces and the
//! recorded keyframes. The UI reads it and reports user input back
//! through its methods; media notifications arrive via `handle_event`
//! and `tick`.
//!
//! Lifecycle: `Loading` until the primary surface reports metadata, then
//! `Ready`. Any surface error moves to `Error`, which is terminal: every
//! operation is ignored from then on.

use crate::editor::drag::DragController;
use crate::editor::recorder::KeyframeRecorder;
use crate::editor::sync::{PlaybackSynchronizer, SurfaceRole};
use crate::error::EditorError;
use crate::io::media::{ClockSurface, MediaInfo, MediaSurface, SurfaceEvent};
use crate::models::crop::{AspectRatio, ContainerSize, CropRect};
use crate::models::keyframe::RecordingSession;
use crate::models::playback::PlaybackState;
use crate::util::geometry::compute_crop_rect;
use std::time::Duration;

/// Builds a playback surface for loaded media.
pub type SurfaceFactory = Box<dyn Fn(&MediaInfo) -> Box<dyn MediaSurface>>;

/// Lifecycle phase of the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorPhase {
    Loading,
    Ready,
    Error(EditorError),
}

pub struct EditorState {
    phase: EditorPhase,
    container: ContainerSize,
    aspect: AspectRatio,
    crop: CropRect,
    cropping: bool,
    drag: DragController,
    sync: Option<PlaybackSynchronizer>,
    recorder: KeyframeRecorder,
    media: Option<MediaInfo>,
    factory: SurfaceFactory,
}

impl EditorState {
    /// Create an editor waiting for media metadata.
    pub fn new(container: ContainerSize, aspect: AspectRatio, recording: bool) -> Self {
        Self {
            phase: EditorPhase::Loading,
            container,
            aspect,
            crop: CropRect::default(),
            cropping: false,
            drag: DragController::new(),
            sync: None,
            recorder: KeyframeRecorder::new(recording),
            media: None,
            factory: Box::new(|info: &MediaInfo| -> Box<dyn MediaSurface> {
                Box::new(ClockSurface::new(info))
            }),
        }
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn crop(&self) -> &CropRect {
        &self.crop
    }

    pub fn is_cropping(&self) -> bool {
        self.cropping
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn media(&self) -> Option<&MediaInfo> {
        self.media.as_ref()
    }

    pub fn playback(&self) -> Option<&PlaybackState> {
        self.sync.as_ref().map(|s| s.state())
    }

    pub fn synchronizer(&self) -> Option<&PlaybackSynchronizer> {
        self.sync.as_ref()
    }

    pub fn recording_enabled(&self) -> bool {
        self.recorder.is_enabled()
    }

    pub fn session(&self) -> &RecordingSession {
        self.recorder.session()
    }

    /// Enter the terminal error phase, releasing both surfaces.
    pub fn fail(&mut self, error: EditorError) {
        if matches!(self.phase, EditorPhase::Error(_)) {
            return;
        }
        log::error!("{}", error);
        self.sync = None;
        self.cropping = false;
        self.drag.end();
        self.phase = EditorPhase::Error(error);
    }

    /// Synchronizer, only while controls are operable.
    fn controls(&mut self) -> Option<&mut PlaybackSynchronizer> {
        if self.phase == EditorPhase::Ready {
            self.sync.as_mut()
        } else {
            None
        }
    }

    /// React to a notification from one of the surfaces.
    pub fn handle_event(&mut self, role: SurfaceRole, event: SurfaceEvent) {
        if matches!(self.phase, EditorPhase::Error(_)) {
            return;
        }

        match (role, event) {
            (_, SurfaceEvent::Error(msg)) => {
                self.fail(EditorError::playback(msg));
            }
            (SurfaceRole::Primary, SurfaceEvent::LoadedMetadata(info)) => {
                // Only the first load sizes the cropper
                if self.sync.is_some() {
                    return;
                }
                let primary = (self.factory)(&info);
                self.sync = Some(PlaybackSynchronizer::new(primary));
                self.crop = compute_crop_rect(self.container, self.aspect);
                self.phase = EditorPhase::Ready;
                log::info!(
                    "Loaded {} ({:.2}s), cropper {} at {:?}",
                    info.source,
                    info.duration,
                    self.aspect,
                    self.crop
                );
                self.media = Some(info);
            }
            (SurfaceRole::Primary, SurfaceEvent::TimeUpdate(time)) => {
                let Some(sync) = self.sync.as_ref() else {
                    return;
                };
                let mut sample = sync.state().clone();
                sample.current_time = time;
                self.recorder
                    .on_time_update(self.cropping, &self.crop, &sample);
            }
            (SurfaceRole::Primary, SurfaceEvent::Ended) => {
                log::info!("Playback reached the end");
            }
            (SurfaceRole::Preview, _) => {}
        }
    }

    /// Advance playback by `elapsed` and process the resulting events.
    pub fn tick(&mut self, elapsed: Duration) {
        let Some(sync) = self.controls() else {
            return;
        };
        for (role, event) in sync.tick(elapsed) {
            self.handle_event(role, event);
        }
    }

    pub fn start_cropper(&mut self) {
        if self.phase != EditorPhase::Ready || self.cropping {
            return;
        }
        let Some(info) = self.media.as_ref() else {
            return;
        };
        let preview = (self.factory)(info);
        if let Some(sync) = self.sync.as_mut() {
            sync.attach_preview(preview);
        }
        self.cropping = true;
        log::info!("Cropper started at {:?}", self.crop);
    }

    pub fn remove_cropper(&mut self) {
        if self.phase != EditorPhase::Ready || !self.cropping {
            return;
        }
        if let Some(sync) = self.sync.as_mut() {
            sync.detach_preview();
        }
        self.drag.end();
        self.cropping = false;
        log::info!("Cropper removed");
    }

    /// Select a new aspect ratio and re-center the crop rectangle.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        if matches!(self.phase, EditorPhase::Error(_)) {
            return;
        }
        self.aspect = aspect;
        // While loading the container is not measurable yet; metadata sizes it
        if self.phase == EditorPhase::Ready {
            self.crop = compute_crop_rect(self.container, aspect);
            log::info!("Aspect ratio {} gives {:?}", aspect, self.crop);
        }
    }

    /// Pointer pressed at container-local `pos`.
    pub fn pointer_down(&mut self, pos: (f32, f32)) {
        if self.phase != EditorPhase::Ready {
            return;
        }
        if self.drag.begin(pos, &self.crop, self.cropping) {
            log::debug!("Drag started at ({:.1}, {:.1})", pos.0, pos.1);
        }
    }

    /// Pointer moved to container-local `pos`.
    pub fn pointer_move(&mut self, pos: (f32, f32)) {
        if self.phase != EditorPhase::Ready {
            return;
        }
        if let Some((x, y)) = self.drag.update(pos, &self.crop, self.container, self.cropping) {
            self.crop.x = x;
            self.crop.y = y;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.drag.is_dragging() {
            log::debug!("Drag ended at {:?}", self.crop);
        }
        self.drag.end();
    }

    /// The pointer left the container; handled like a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    pub fn toggle_play(&mut self) {
        if let Some(sync) = self.controls() {
            sync.toggle_play();
        }
    }

    pub fn seek(&mut self, time: f64) {
        if let Some(sync) = self.controls() {
            sync.seek(time);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Some(sync) = self.controls() {
            sync.set_volume(volume);
        }
    }

    pub fn toggle_mute(&mut self) {
        if let Some(sync) = self.controls() {
            sync.toggle_mute();
        }
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        if let Some(sync) = self.controls() {
            sync.set_playback_rate(rate);
        }
    }
}
