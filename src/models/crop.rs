// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop geometry data structures.
//!
//! This module defines the aspect ratios offered by the editor, the crop
//! rectangle positioned over the video, and the logical container the
//! rectangle lives in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target aspect ratio of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    NineSixteen,
    NineEighteen,
    FourThree,
    ThreeFour,
    OneOne,
    FourFive,
}

impl AspectRatio {
    /// Every selectable ratio, in selector order.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::NineSixteen,
        AspectRatio::NineEighteen,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
        AspectRatio::OneOne,
        AspectRatio::FourFive,
    ];

    /// Width and height terms of the ratio.
    pub fn terms(self) -> (u32, u32) {
        match self {
            AspectRatio::NineSixteen => (9, 16),
            AspectRatio::NineEighteen => (9, 18),
            AspectRatio::FourThree => (4, 3),
            AspectRatio::ThreeFour => (3, 4),
            AspectRatio::OneOne => (1, 1),
            AspectRatio::FourFive => (4, 5),
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f32 {
        let (w, h) = self.terms();
        w as f32 / h as f32
    }

    /// Selector label, e.g. `"9:16"`.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::NineSixteen => "9:16",
            AspectRatio::NineEighteen => "9:18",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::OneOne => "1:1",
            AspectRatio::FourFive => "4:5",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ar| ar.label() == trimmed)
            .ok_or_else(|| format!("unsupported aspect ratio: {trimmed}"))
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.label().to_string()
    }
}

/// Logical size of the video container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Crop rectangle in container-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    /// Corner coordinates as `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Whether a container-local point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_labels_parse_back() {
        for ar in AspectRatio::ALL {
            assert_eq!(ar.label().parse::<AspectRatio>(), Ok(ar));
        }
        assert!("16:9".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_aspect_ratio_values() {
        assert!((AspectRatio::NineSixteen.ratio() - 0.5625).abs() < 1e-6);
        assert!((AspectRatio::NineEighteen.ratio() - 0.5).abs() < 1e-6);
        assert!((AspectRatio::OneOne.ratio() - 1.0).abs() < 1e-6);
        assert_eq!(AspectRatio::default(), AspectRatio::NineSixteen);
    }

    #[test]
    fn test_aspect_ratio_serializes_as_label() {
        let json = serde_json::to_string(&AspectRatio::FourFive).unwrap();
        assert_eq!(json, "\"4:5\"");
        let back: AspectRatio = serde_json::from_str("\"3:4\"").unwrap();
        assert_eq!(back, AspectRatio::ThreeFour);
    }

    #[test]
    fn test_corners_and_contains() {
        let rect = CropRect { x: 150.0, y: 0.0, width: 600.0, height: 600.0 };
        assert_eq!(rect.corners(), [150.0, 0.0, 750.0, 600.0]);
        assert!(rect.contains(150.0, 0.0));
        assert!(rect.contains(400.0, 300.0));
        assert!(!rect.contains(149.0, 10.0));
        assert!(!rect.contains(400.0, 601.0));
    }
}
