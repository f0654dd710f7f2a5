// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the editor state, feeds it media notifications and
//! wall-clock ticks, and routes the actions reported by the UI panels
//! back into it.

use crate::config::EditorConfig;
use crate::editor::state::{EditorPhase, EditorState};
use crate::editor::sync::SurfaceRole;
use crate::error::EditorError;
use crate::io::frames::FrameGrabber;
use crate::io::media::{spawn_probe, SurfaceEvent};
use crate::io::serialization::{export_recording, EXPORT_FILE_NAME};
use crate::ui::{canvas, preview, timeline, toolbar};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

/// Main application state.
pub struct FlipCropApp {
    /// Crop geometry, playback and recording
    editor: EditorState,

    config: EditorConfig,

    /// Receiver for background media probing
    probe: Option<Receiver<SurfaceEvent>>,

    /// Frame decoder for the loaded source, when one is compiled in
    frames: Option<FrameGrabber>,

    /// Most recent decoded frame
    frame_texture: Option<egui::TextureHandle>,

    /// Time of the previous update, for advancing playback
    last_tick: Instant,

    /// Outcome of the last export, shown in the status line
    status: Option<String>,
}

impl FlipCropApp {
    /// Create the editor and start probing the configured sources.
    pub fn new(config: EditorConfig) -> Self {
        let mut editor =
            EditorState::new(config.container(), config.initial_aspect, config.recording);

        let probe = if config.sources.is_empty() {
            editor.fail(EditorError::SourceMissing);
            None
        } else {
            log::info!("Probing {:?}", config.sources);
            Some(spawn_probe(config.sources.clone()))
        };

        Self {
            editor,
            config,
            probe,
            frames: None,
            frame_texture: None,
            last_tick: Instant::now(),
            status: None,
        }
    }

    /// Deliver the probe result once it arrives.
    fn poll_probe(&mut self) {
        let Some(ref receiver) = self.probe else {
            return;
        };
        let event = match receiver.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                SurfaceEvent::Error("media probe ended without a result".to_string())
            }
        };
        self.probe = None;

        if let SurfaceEvent::LoadedMetadata(ref info) = event {
            match FrameGrabber::open(&info.source) {
                Ok(grabber) => self.frames = grabber,
                Err(e) => {
                    self.editor.handle_event(
                        SurfaceRole::Primary,
                        SurfaceEvent::Error(format!("{:#}", e)),
                    );
                    return;
                }
            }
        }
        self.editor.handle_event(SurfaceRole::Primary, event);
    }

    /// Decode the frame for the current time if it changed.
    fn refresh_frame(&mut self, ctx: &egui::Context) {
        let (Some(grabber), Some(playback)) = (self.frames.as_mut(), self.editor.playback()) else {
            return;
        };
        let time = playback.current_time;
        if !grabber.needs_frame(time) {
            return;
        }

        match grabber.frame_at(time) {
            Ok(Some(frame)) => {
                let size = [frame.width as usize, frame.height as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
                match self.frame_texture {
                    Some(ref mut texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.frame_texture =
                            Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                self.editor
                    .handle_event(SurfaceRole::Primary, SurfaceEvent::Error(format!("{:#}", e)));
            }
        }
    }

    /// Export the recorded keyframes into a folder chosen by the user.
    fn generate_preview(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Save recording")
            .set_directory(&self.config.export_dir)
            .pick_folder()
        else {
            log::info!("Export cancelled");
            self.status = Some(format!("Export cancelled; {} was not written", EXPORT_FILE_NAME));
            return;
        };

        let keyframes = self.editor.session().keyframes();
        self.status = Some(match export_recording(keyframes, &dir) {
            Ok((path, count)) => {
                log::info!("Exported {} keyframes to {}", count, path.display());
                format!("Saved {} keyframes to {}", count, path.display())
            }
            Err(e) => {
                log::error!("Failed to export recording: {:#}", e);
                format!("Export failed: {:#}", e)
            }
        });
    }

    fn show_loading(ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.spinner();
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("Loading video...")
                            .size(16.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                });
            });
        });
    }

    fn show_error(ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Error loading video. Please check the video source.")
                        .size(16.0)
                        .color(egui::Color32::from_rgb(248, 113, 113)),
                );
            });
        });
    }
}

impl eframe::App for FlipCropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_probe();

        let now = Instant::now();
        self.editor.tick(now - self.last_tick);
        self.last_tick = now;
        self.refresh_frame(ctx);

        match self.editor.phase() {
            EditorPhase::Loading => {
                Self::show_loading(ctx);
                ctx.request_repaint();
                return;
            }
            EditorPhase::Error(_) => {
                Self::show_error(ctx);
                return;
            }
            EditorPhase::Ready => {}
        }

        // Keep the clock moving while playing
        if self.editor.playback().is_some_and(|p| p.playing) {
            ctx.request_repaint();
        }

        // Space toggles playback unless a widget has keyboard focus
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.editor.toggle_play();
        }

        // Cropper actions (bottom)
        let action = egui::TopBottomPanel::bottom("actions")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let action = toolbar::show_actions(ui, &self.editor);
                if let Some(ref status) = self.status {
                    ui.label(egui::RichText::new(status).small().weak());
                }
                ui.add_space(6.0);
                action
            })
            .inner;
        self.apply_toolbar(ctx, action);

        // Playback controls and selectors
        let (timeline_action, selector_action) = egui::TopBottomPanel::bottom("controls")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let timeline_action = match self.editor.playback() {
                    Some(playback) => timeline::show(ui, playback),
                    None => timeline::TimelineAction::None,
                };
                let selector_action = toolbar::show_selectors(ui, &self.editor);
                ui.add_space(6.0);
                (timeline_action, selector_action)
            })
            .inner;

        match timeline_action {
            timeline::TimelineAction::TogglePlay => self.editor.toggle_play(),
            timeline::TimelineAction::Seek(time) => self.editor.seek(time),
            timeline::TimelineAction::ToggleMute => self.editor.toggle_mute(),
            timeline::TimelineAction::SetVolume(volume) => self.editor.set_volume(volume),
            timeline::TimelineAction::None => {}
        }
        self.apply_toolbar(ctx, selector_action);

        // Preview panel (right side)
        egui::SidePanel::right("preview")
            .default_width(320.0)
            .show(ctx, |ui| {
                preview::show(ui, &self.editor, self.frame_texture.as_ref());
            });

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.editor, self.frame_texture.as_ref()))
            .inner;

        match canvas_action {
            canvas::CanvasAction::PointerDown(pos) => self.editor.pointer_down(pos),
            canvas::CanvasAction::PointerMove(pos) => self.editor.pointer_move(pos),
            canvas::CanvasAction::PointerUp => self.editor.pointer_up(),
            canvas::CanvasAction::PointerLeave => self.editor.pointer_leave(),
            canvas::CanvasAction::None => {}
        }
    }
}

impl FlipCropApp {
    fn apply_toolbar(&mut self, ctx: &egui::Context, action: toolbar::ToolbarAction) {
        match action {
            toolbar::ToolbarAction::SetPlaybackRate(rate) => self.editor.set_playback_rate(rate),
            toolbar::ToolbarAction::SetAspectRatio(aspect) => self.editor.set_aspect_ratio(aspect),
            toolbar::ToolbarAction::StartCropper => self.editor.start_cropper(),
            toolbar::ToolbarAction::RemoveCropper => self.editor.remove_cropper(),
            toolbar::ToolbarAction::GeneratePreview => self.generate_preview(),
            toolbar::ToolbarAction::Cancel => {
                log::info!("Editor cancelled");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            toolbar::ToolbarAction::None => {}
        }
    }
}
