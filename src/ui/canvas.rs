// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video canvas with the draggable crop rectangle.
//!
//! This module draws the video container scaled into the central panel,
//! overlays the crop rectangle with its rule-of-thirds grid, and reports
//! pointer gestures in container-local coordinates.

use crate::editor::state::EditorState;
use crate::models::crop::CropRect;
use crate::util::geometry::{container_to_screen, content_rect, fit_container, screen_to_container};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    PointerDown((f32, f32)),
    PointerMove((f32, f32)),
    PointerUp,
    PointerLeave,
}

/// Display the video container and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    editor: &EditorState,
    frame_texture: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let container = editor.container();
    let available = ui.available_rect_before_wrap();
    let screen_rect = fit_container(available, container);

    let (_, response) = ui.allocate_exact_size(available.size(), egui::Sense::drag());
    let painter = ui.painter_at(available);

    // Container background
    painter.rect_filled(screen_rect, 6.0, egui::Color32::BLACK);

    let media = editor.media();
    let content = media
        .map(|m| content_rect(container, m.width, m.height))
        .unwrap_or(CropRect {
            x: 0.0,
            y: 0.0,
            width: container.width,
            height: container.height,
        });
    let content_screen = container_to_screen(&content, screen_rect, container);

    if let Some(texture) = frame_texture {
        painter.image(
            texture.id(),
            content_screen,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    } else {
        painter.rect_filled(content_screen, 0.0, egui::Color32::from_gray(24));
        let time = editor.playback().map(|p| p.current_time).unwrap_or(0.0);
        painter.text(
            content_screen.center(),
            egui::Align2::CENTER_CENTER,
            format!("{:.2}s", time),
            egui::FontId::monospace(28.0),
            egui::Color32::from_gray(90),
        );
    }

    if editor.is_cropping() {
        let crop_screen = container_to_screen(editor.crop(), screen_rect, container);
        draw_cropper(&painter, screen_rect, crop_screen, editor.is_dragging());
    }

    // Pointer gestures, in container-local coordinates
    let to_local = |pos: egui::Pos2| screen_to_container(pos, screen_rect, container);
    let hover = ui.input(|i| i.pointer.hover_pos());

    if response.drag_stopped() {
        return CanvasAction::PointerUp;
    }
    if editor.is_dragging() {
        if let Some(pos) = hover {
            if !screen_rect.contains(pos) {
                return CanvasAction::PointerLeave;
            }
        }
    }
    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            if screen_rect.contains(pos) {
                return CanvasAction::PointerDown(to_local(pos));
            }
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::PointerMove(to_local(pos));
        }
    }

    CanvasAction::None
}

/// Draw the crop rectangle, dimming the area outside it.
fn draw_cropper(
    painter: &egui::Painter,
    container: egui::Rect,
    crop: egui::Rect,
    dragging: bool,
) {
    let shade = egui::Color32::from_black_alpha(140);
    let bands = [
        egui::Rect::from_min_max(container.min, egui::pos2(crop.min.x, container.max.y)),
        egui::Rect::from_min_max(egui::pos2(crop.max.x, container.min.y), container.max),
        egui::Rect::from_min_max(
            egui::pos2(crop.min.x, container.min.y),
            egui::pos2(crop.max.x, crop.min.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(crop.min.x, crop.max.y),
            egui::pos2(crop.max.x, container.max.y),
        ),
    ];
    for band in bands {
        if band.width() > 0.0 && band.height() > 0.0 {
            painter.rect_filled(band, 0.0, shade);
        }
    }

    // Rule-of-thirds grid
    let grid = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(128));
    for i in 1..3 {
        let t = i as f32 / 3.0;
        let x = crop.min.x + crop.width() * t;
        let y = crop.min.y + crop.height() * t;
        painter.line_segment([egui::pos2(x, crop.min.y), egui::pos2(x, crop.max.y)], grid);
        painter.line_segment([egui::pos2(crop.min.x, y), egui::pos2(crop.max.x, y)], grid);
    }

    let border = if dragging { 2.0 } else { 1.0 };
    painter.rect_stroke(crop, 0.0, egui::Stroke::new(border, egui::Color32::WHITE));
}
