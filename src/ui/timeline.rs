// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback controls and timeline scrubber.
//!
//! This module provides the play/pause toggle, the seek slider with its
//! time readout, and the mute toggle with the volume slider.

use crate::models::playback::{format_time, PlaybackState};

/// Result of playback control interaction.
pub enum TimelineAction {
    None,
    TogglePlay,
    Seek(f64),
    ToggleMute,
    SetVolume(f32),
}

/// Display the playback controls for `playback`.
pub fn show(ui: &mut egui::Ui, playback: &PlaybackState) -> TimelineAction {
    let mut action = TimelineAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let play_icon = if playback.playing { "⏸" } else { "▶" };
        if ui.button(play_icon).clicked() {
            action = TimelineAction::TogglePlay;
        }

        // Reserve room for the readout and the volume group on the right
        let slider_width = (ui.available_width() - 260.0).max(80.0);
        ui.spacing_mut().slider_width = slider_width;
        let mut time = playback.current_time;
        let seek = ui.add(
            egui::Slider::new(&mut time, 0.0..=playback.duration.max(0.0)).show_value(false),
        );
        if seek.changed() {
            action = TimelineAction::Seek(time);
        }

        ui.label(
            egui::RichText::new(format!(
                "{} / {}",
                format_time(playback.current_time),
                format_time(playback.duration)
            ))
            .monospace(),
        );

        let mute_icon = if playback.muted { "🔇" } else { "🔊" };
        if ui.button(mute_icon).clicked() {
            action = TimelineAction::ToggleMute;
        }

        ui.spacing_mut().slider_width = 96.0;
        let mut volume = playback.volume;
        let slider = ui.add(
            egui::Slider::new(&mut volume, 0.0..=1.0)
                .step_by(0.1)
                .show_value(false),
        );
        if slider.changed() {
            action = TimelineAction::SetVolume(volume);
        }
    });

    action
}
