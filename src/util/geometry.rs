// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module sizes the crop rectangle for an aspect ratio, keeps its
//! position inside the container, and converts between screen coordinates
//! and container-local coordinates.

use crate::models::crop::{AspectRatio, ContainerSize, CropRect};

/// Size a crop rectangle to the full container height and center it horizontally.
pub fn compute_crop_rect(container: ContainerSize, aspect: AspectRatio) -> CropRect {
    let height = container.height;
    let width = height * aspect.ratio();

    CropRect {
        x: (container.width - width) / 2.0,
        y: 0.0,
        width,
        height,
    }
}

/// Clamp a top-left position so a `width` x `height` rectangle stays inside the container.
pub fn clamp_position(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    container: ContainerSize,
) -> (f32, f32) {
    let max_x = (container.width - width).max(0.0);
    let max_y = (container.height - height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Convert a screen position to container-local logical pixels.
///
/// `screen_rect` is where the container is drawn; it may be scaled
/// relative to the logical `container` size.
pub fn screen_to_container(
    pos: egui::Pos2,
    screen_rect: egui::Rect,
    container: ContainerSize,
) -> (f32, f32) {
    let scale_x = if screen_rect.width() > 0.0 {
        container.width / screen_rect.width()
    } else {
        0.0
    };
    let scale_y = if screen_rect.height() > 0.0 {
        container.height / screen_rect.height()
    } else {
        0.0
    };
    (
        (pos.x - screen_rect.min.x) * scale_x,
        (pos.y - screen_rect.min.y) * scale_y,
    )
}

/// Convert a container-local rectangle to screen space.
pub fn container_to_screen(
    rect: &CropRect,
    screen_rect: egui::Rect,
    container: ContainerSize,
) -> egui::Rect {
    let sx = if container.width > 0.0 {
        screen_rect.width() / container.width
    } else {
        0.0
    };
    let sy = if container.height > 0.0 {
        screen_rect.height() / container.height
    } else {
        0.0
    };
    egui::Rect::from_min_size(
        screen_rect.min + egui::vec2(rect.x * sx, rect.y * sy),
        egui::vec2(rect.width * sx, rect.height * sy),
    )
}

/// Largest rectangle of the container's aspect that fits `available`, centered in it.
pub fn fit_container(available: egui::Rect, container: ContainerSize) -> egui::Rect {
    if container.width <= 0.0 || container.height <= 0.0 {
        return egui::Rect::from_min_size(available.min, egui::Vec2::ZERO);
    }
    let aspect = container.width / container.height;
    let available_aspect = available.width() / available.height().max(1.0);

    let (w, h) = if aspect > available_aspect {
        // Container is wider - fit to width
        (available.width(), available.width() / aspect)
    } else {
        // Container is taller - fit to height
        (available.height() * aspect, available.height())
    };

    egui::Rect::from_center_size(available.center(), egui::vec2(w, h))
}

/// Where media of `media_width` x `media_height` is shown inside the container.
///
/// The picture is scaled to fit and centered, leaving bars on the sides
/// that don't match.
pub fn content_rect(container: ContainerSize, media_width: u32, media_height: u32) -> CropRect {
    if media_width == 0 || media_height == 0 || container.height <= 0.0 {
        return CropRect { x: 0.0, y: 0.0, width: container.width, height: container.height };
    }
    let media_aspect = media_width as f32 / media_height as f32;
    let container_aspect = container.width / container.height;

    let (width, height) = if media_aspect > container_aspect {
        (container.width, container.width / media_aspect)
    } else {
        (container.height * media_aspect, container.height)
    };

    CropRect {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    }
}

/// Texture coordinates of the part of the picture under the crop rectangle.
///
/// `content` is where the picture sits in the container (see `content_rect`).
/// Coordinates are clamped to the picture, so bars under the crop are dropped.
pub fn crop_uv(rect: &CropRect, content: &CropRect) -> egui::Rect {
    if content.width <= 0.0 || content.height <= 0.0 {
        return egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    }
    let u = |x: f32| ((x - content.x) / content.width).clamp(0.0, 1.0);
    let v = |y: f32| ((y - content.y) / content.height).clamp(0.0, 1.0);
    egui::Rect::from_min_max(
        egui::pos2(u(rect.x), v(rect.y)),
        egui::pos2(u(rect.x + rect.width), v(rect.y + rect.height)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_square_crop_in_900x600() {
        let rect = compute_crop_rect(ContainerSize::new(900.0, 600.0), AspectRatio::OneOne);
        assert_eq!(rect, CropRect { x: 150.0, y: 0.0, width: 600.0, height: 600.0 });
    }

    #[test]
    fn test_portrait_crop_is_centered() {
        let rect = compute_crop_rect(ContainerSize::new(960.0, 540.0), AspectRatio::NineSixteen);
        assert!((rect.width - 303.75).abs() < 1e-3);
        assert!((rect.x - (960.0 - 303.75) / 2.0).abs() < 1e-3);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_zero_container_is_degenerate() {
        let rect = compute_crop_rect(ContainerSize::new(0.0, 0.0), AspectRatio::FourThree);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn test_clamp_position_edges() {
        let container = ContainerSize::new(900.0, 600.0);
        assert_eq!(clamp_position(-20.0, -5.0, 600.0, 600.0, container), (0.0, 0.0));
        assert_eq!(clamp_position(500.0, 40.0, 600.0, 600.0, container), (300.0, 0.0));
        assert_eq!(clamp_position(120.0, 0.0, 600.0, 600.0, container), (120.0, 0.0));
    }

    #[test]
    fn test_clamp_oversized_rect_collapses_to_origin() {
        let container = ContainerSize::new(300.0, 600.0);
        assert_eq!(clamp_position(50.0, 0.0, 800.0, 600.0, container), (0.0, 0.0));
    }

    #[test]
    fn test_screen_container_roundtrip_with_scale() {
        let container = ContainerSize::new(960.0, 540.0);
        let screen = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(480.0, 270.0));

        let (x, y) = screen_to_container(egui::pos2(340.0, 185.0), screen, container);
        assert!((x - 480.0).abs() < 1e-3);
        assert!((y - 270.0).abs() < 1e-3);

        let rect = CropRect { x: 480.0, y: 0.0, width: 100.0, height: 540.0 };
        let on_screen = container_to_screen(&rect, screen, container);
        assert!((on_screen.min.x - 340.0).abs() < 1e-3);
        assert!((on_screen.height() - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_fit_container_letterboxes() {
        let container = ContainerSize::new(960.0, 540.0);
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 800.0));
        let fitted = fit_container(available, container);
        assert!((fitted.width() - 800.0).abs() < 1e-3);
        assert!((fitted.height() - 450.0).abs() < 1e-3);
        assert!((fitted.center().y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_content_rect_pillarboxes_narrow_media() {
        let container = ContainerSize::new(960.0, 540.0);
        let content = content_rect(container, 1080, 1920);
        assert_eq!(content.height, 540.0);
        assert!((content.width - 303.75).abs() < 1e-3);
        assert!((content.x - 328.125).abs() < 1e-3);

        let full = content_rect(container, 1920, 1080);
        assert!((full.width - 960.0).abs() < 1e-2);
        assert!((full.height - 540.0).abs() < 1e-2);
        assert!(full.x.abs() < 1e-2 && full.y.abs() < 1e-2);
    }

    #[test]
    fn test_crop_uv() {
        let content = CropRect { x: 0.0, y: 0.0, width: 900.0, height: 600.0 };
        let rect = CropRect { x: 150.0, y: 0.0, width: 600.0, height: 600.0 };
        let uv = crop_uv(&rect, &content);
        assert!((uv.min.x - 1.0 / 6.0).abs() < 1e-6);
        assert!((uv.max.x - 5.0 / 6.0).abs() < 1e-6);
        assert_eq!(uv.max.y, 1.0);

        // Crop hanging over the bars is clamped to the picture
        let narrow = CropRect { x: 300.0, y: 0.0, width: 300.0, height: 600.0 };
        let uv = crop_uv(&CropRect { x: 200.0, ..narrow }, &narrow);
        assert_eq!(uv.min.x, 0.0);
        assert!((uv.max.x - 2.0 / 3.0).abs() < 1e-6);
    }

    fn any_aspect() -> impl Strategy<Value = AspectRatio> {
        prop::sample::select(AspectRatio::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn crop_height_and_width_follow_ratio(
            aspect in any_aspect(),
            width in 1.0f32..4000.0,
            height in 1.0f32..4000.0,
        ) {
            let rect = compute_crop_rect(ContainerSize::new(width, height), aspect);
            prop_assert_eq!(rect.height, height);
            prop_assert!((rect.width - height * aspect.ratio()).abs() <= 1e-3 * height.max(1.0));
            prop_assert_eq!(rect.y, 0.0);
        }

        #[test]
        fn clamped_position_stays_in_bounds(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            cw in 1.0f32..3000.0,
            ch in 1.0f32..3000.0,
            rw_frac in 0.0f32..1.0,
            rh_frac in 0.0f32..1.0,
        ) {
            let container = ContainerSize::new(cw, ch);
            let (rw, rh) = (cw * rw_frac, ch * rh_frac);
            let (nx, ny) = clamp_position(x, y, rw, rh, container);
            prop_assert!(nx >= 0.0 && nx <= cw - rw);
            prop_assert!(ny >= 0.0 && ny <= ch - rh);
        }
    }
}
