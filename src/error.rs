// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error kinds that put the editor into its terminal error state.

/// Failure that ends the editor session.
///
/// Both kinds are shown to the user the same way; the distinction is kept
/// for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("No video source was supplied")]
    SourceMissing,

    #[error("Video playback failed: {0}")]
    Playback(String),
}

impl EditorError {
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}
