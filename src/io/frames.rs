// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Decoded video frames for the canvas.
//!
//! Frames come from OpenCV when the `video-opencv` feature is enabled.
//! Without it `FrameGrabber::open` yields no grabber and the canvas draws
//! a placeholder instead of the picture.

use anyhow::Result;

/// An RGBA frame ready to upload as a texture.
#[cfg_attr(not(feature = "video-opencv"), allow(dead_code))]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Frames closer together than this are not re-decoded.
const MIN_FRAME_STEP: f64 = 1.0 / 30.0;

/// Decodes frames of one media source at requested times.
#[cfg_attr(not(feature = "video-opencv"), allow(dead_code))]
pub struct FrameGrabber {
    #[cfg(feature = "video-opencv")]
    capture: opencv::videoio::VideoCapture,
    last_time: Option<f64>,
}

impl FrameGrabber {
    /// Open `source` for decoding, or `None` when built without a decoder.
    #[cfg(feature = "video-opencv")]
    pub fn open(source: &str) -> Result<Option<Self>> {
        use opencv::prelude::*;
        use opencv::videoio;

        let capture = videoio::VideoCapture::from_file(source, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            anyhow::bail!("OpenCV could not open {}", source);
        }
        log::info!("Opened {} for frame decoding", source);
        Ok(Some(Self { capture, last_time: None }))
    }

    /// Open `source` for decoding, or `None` when built without a decoder.
    #[cfg(not(feature = "video-opencv"))]
    pub fn open(source: &str) -> Result<Option<Self>> {
        log::debug!("No frame decoder compiled in; {} plays without picture", source);
        Ok(None)
    }

    /// Whether a frame at `time` would differ from the last one decoded.
    pub fn needs_frame(&self, time: f64) -> bool {
        self.last_time
            .map(|last| (time - last).abs() >= MIN_FRAME_STEP)
            .unwrap_or(true)
    }

    /// Decode the frame shown at `time` seconds.
    #[cfg(feature = "video-opencv")]
    pub fn frame_at(&mut self, time: f64) -> Result<Option<RgbaFrame>> {
        use opencv::core::Mat;
        use opencv::prelude::*;
        use opencv::{imgproc, videoio};

        if !self.needs_frame(time) {
            return Ok(None);
        }

        self.capture.set(videoio::CAP_PROP_POS_MSEC, time * 1000.0)?;
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }

        let mut rgba = Mat::default();
        imgproc::cvt_color(&frame, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;
        let size = rgba.size()?;
        self.last_time = Some(time);

        Ok(Some(RgbaFrame {
            width: size.width as u32,
            height: size.height as u32,
            pixels: rgba.data_bytes()?.to_vec(),
        }))
    }

    /// Decode the frame shown at `time` seconds.
    #[cfg(not(feature = "video-opencv"))]
    pub fn frame_at(&mut self, time: f64) -> Result<Option<RgbaFrame>> {
        self.last_time = Some(time);
        Ok(None)
    }
}
