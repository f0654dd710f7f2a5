// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line arguments.

use crate::models::crop::{AspectRatio, ContainerSize};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings the editor is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Alternative encodings of the same video; the first playable one is used.
    pub sources: Vec<String>,

    /// Record crop keyframes while the cropper is active.
    pub recording: bool,

    /// Directory offered when saving the recording.
    pub export_dir: PathBuf,

    /// Logical container size the crop coordinates refer to.
    pub container_width: f32,
    pub container_height: f32,

    /// Aspect ratio selected at startup.
    pub initial_aspect: AspectRatio,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            recording: true,
            export_dir: PathBuf::from("."),
            container_width: 960.0,
            container_height: 540.0,
            initial_aspect: AspectRatio::default(),
        }
    }
}

impl EditorConfig {
    /// Load settings from a YAML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn container(&self) -> ContainerSize {
        ContainerSize::new(self.container_width, self.container_height)
    }

    /// Apply command-line overrides on top of file settings.
    pub fn apply_overrides(
        &mut self,
        sources: Vec<String>,
        no_recording: bool,
        export_dir: Option<PathBuf>,
    ) {
        if !sources.is_empty() {
            self.sources = sources;
        }
        if no_recording {
            self.recording = false;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EditorConfig::from_yaml(
            "sources:\n  - clip.webm\n  - clip.mp4\ninitial_aspect: \"4:5\"\n",
        )
        .unwrap();

        assert_eq!(config.sources, vec!["clip.webm", "clip.mp4"]);
        assert_eq!(config.initial_aspect, AspectRatio::FourFive);
        assert!(config.recording);
        assert_eq!(config.container(), ContainerSize::new(960.0, 540.0));
    }

    #[test]
    fn test_unknown_aspect_is_rejected() {
        assert!(EditorConfig::from_yaml("initial_aspect: \"16:9\"\n").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = EditorConfig {
            sources: vec!["from_file.mp4".to_string()],
            ..EditorConfig::default()
        };

        config.apply_overrides(Vec::new(), false, None);
        assert_eq!(config.sources, vec!["from_file.mp4"]);
        assert!(config.recording);

        config.apply_overrides(vec!["cli.mp4".to_string()], true, Some(PathBuf::from("/tmp")));
        assert_eq!(config.sources, vec!["cli.mp4"]);
        assert!(!config.recording);
        assert_eq!(config.export_dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flipcrop.yaml");
        std::fs::write(&path, "recording: false\ncontainer_width: 900\ncontainer_height: 600\n")
            .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert!(!config.recording);
        assert_eq!(config.container(), ContainerSize::new(900.0, 600.0));
        assert!(EditorConfig::load(&dir.path().join("missing.yaml")).is_err());
    }
}
