// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer-drag repositioning of the crop rectangle.

use crate::models::crop::{ContainerSize, CropRect};
use crate::util::geometry::clamp_position;

/// Transient state of a drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragController {
    /// Pointer offset from the rectangle's top-left corner, while dragging.
    grab_offset: Option<(f32, f32)>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    /// Start a gesture if cropping is active and the pointer is inside `rect`.
    ///
    /// `pointer` is in container-local coordinates.
    pub fn begin(&mut self, pointer: (f32, f32), rect: &CropRect, cropping: bool) -> bool {
        if !cropping || !rect.contains(pointer.0, pointer.1) {
            return false;
        }
        self.grab_offset = Some((pointer.0 - rect.x, pointer.1 - rect.y));
        true
    }

    /// New clamped top-left for the rectangle, if a gesture is active.
    pub fn update(
        &self,
        pointer: (f32, f32),
        rect: &CropRect,
        container: ContainerSize,
        cropping: bool,
    ) -> Option<(f32, f32)> {
        if !cropping {
            return None;
        }
        let (dx, dy) = self.grab_offset?;
        Some(clamp_position(
            pointer.0 - dx,
            pointer.1 - dy,
            rect.width,
            rect.height,
            container,
        ))
    }

    /// End the gesture. Pointer release and leaving the container both land here.
    pub fn end(&mut self) {
        self.grab_offset = None;
    }
}
