// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the selectors and cropper actions.
//!
//! This module provides the playback-rate and aspect-ratio selectors and
//! the Start Cropper / Remove Cropper / Generate Preview / Cancel buttons.

use crate::editor::state::EditorState;
use crate::models::crop::AspectRatio;
use crate::models::playback::PLAYBACK_RATES;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SetPlaybackRate(f32),
    SetAspectRatio(AspectRatio),
    StartCropper,
    RemoveCropper,
    GeneratePreview,
    Cancel,
}

const ACCENT: egui::Color32 = egui::Color32::from_rgb(124, 58, 237);

/// Display the selector row.
pub fn show_selectors(ui: &mut egui::Ui, editor: &EditorState) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let rate = editor.playback().map(|p| p.playback_rate).unwrap_or(1.0);

    ui.horizontal(|ui| {
        let mut selected_rate = rate;
        egui::ComboBox::from_id_source("playback_rate")
            .selected_text(format!("{}x", rate))
            .show_ui(ui, |ui| {
                for option in PLAYBACK_RATES {
                    ui.selectable_value(&mut selected_rate, option, format!("{}x", option));
                }
            });
        if selected_rate != rate {
            action = ToolbarAction::SetPlaybackRate(selected_rate);
        }

        let mut selected_aspect = editor.aspect();
        egui::ComboBox::from_id_source("aspect_ratio")
            .selected_text(selected_aspect.label())
            .show_ui(ui, |ui| {
                for option in AspectRatio::ALL {
                    ui.selectable_value(&mut selected_aspect, option, option.label());
                }
            });
        if selected_aspect != editor.aspect() {
            action = ToolbarAction::SetAspectRatio(selected_aspect);
        }
    });

    action
}

/// Display the action buttons.
pub fn show_actions(ui: &mut egui::Ui, editor: &EditorState) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let accent = |text: &str| {
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE)).fill(ACCENT)
    };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 12.0;

        if ui.add(accent("Start Cropper")).clicked() {
            action = ToolbarAction::StartCropper;
        }
        if ui.add(accent("Remove Cropper")).clicked() {
            action = ToolbarAction::RemoveCropper;
        }
        if editor.recording_enabled() && ui.add(accent("Generate Preview")).clicked() {
            action = ToolbarAction::GeneratePreview;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Cancel").clicked() {
                action = ToolbarAction::Cancel;
            }
            if editor.recording_enabled() {
                ui.label(
                    egui::RichText::new(format!("{} keyframes", editor.session().len())).weak(),
                );
            }
        });
    });

    action
}
