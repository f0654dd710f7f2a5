// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview panel showing the cropped region.

use crate::editor::state::EditorState;
use crate::models::playback::format_time;
use crate::util::geometry::{content_rect, crop_uv};

const PREVIEW_HEIGHT: f32 = 400.0;

/// Display the preview of the crop, or a hint when the cropper is off.
pub fn show(ui: &mut egui::Ui, editor: &EditorState, frame_texture: Option<&egui::TextureHandle>) {
    ui.label(egui::RichText::new("Preview").color(egui::Color32::from_gray(160)));
    ui.add_space(8.0);

    let preview = editor.synchronizer().and_then(|s| s.preview());
    let Some(preview) = preview.filter(|_| editor.is_cropping()) else {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(egui::RichText::new("▶").size(40.0).color(egui::Color32::from_gray(110)));
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Preview not available").color(egui::Color32::from_gray(160)));
            ui.label(
                egui::RichText::new("Please click on \"Start Cropper\"\nand then play video")
                    .small()
                    .color(egui::Color32::from_gray(120)),
            );
        });
        return;
    };

    let width = ui.available_width();
    let (frame_rect, _) = ui.allocate_exact_size(egui::vec2(width, PREVIEW_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(frame_rect);
    painter.rect_filled(frame_rect, 4.0, egui::Color32::BLACK);

    let crop = editor.crop();
    // Keep the crop's aspect inside the preview box
    let scale = (frame_rect.width() / crop.width.max(1.0)).min(frame_rect.height() / crop.height.max(1.0));
    let target = egui::Rect::from_center_size(
        frame_rect.center(),
        egui::vec2(crop.width * scale, crop.height * scale),
    );

    match (frame_texture, editor.media()) {
        (Some(texture), Some(media)) => {
            let content = content_rect(editor.container(), media.width, media.height);
            painter.image(texture.id(), target, crop_uv(crop, &content), egui::Color32::WHITE);
        }
        _ => {
            painter.rect_stroke(target, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(80)));
            painter.text(
                target.center(),
                egui::Align2::CENTER_CENTER,
                format_time(preview.current_time()),
                egui::FontId::monospace(20.0),
                egui::Color32::from_gray(120),
            );
        }
    }

    ui.add_space(8.0);
    let [x1, y1, x2, y2] = crop.corners();
    ui.label(
        egui::RichText::new(format!("{} crop: ({:.0}, {:.0}) - ({:.0}, {:.0})", editor.aspect(), x1, y1, x2, y2))
            .small()
            .weak(),
    );
    if preview.muted() {
        ui.label(egui::RichText::new("Muted").small().weak());
    }
}
