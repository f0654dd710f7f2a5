// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FlipCrop - video crop keyframe editor
//!
//! A desktop application for positioning an aspect-ratio crop over a video
//! while it plays and recording the crop region over time as JSON
//! keyframes.

mod app;
mod config;
mod editor;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::FlipCropApp;
use clap::Parser;
use config::EditorConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flipcrop", about = "Record crop keyframes over a video", version)]
struct Cli {
    /// Video source; a second source is tried if the first cannot be played
    #[arg(num_args = 0..=2)]
    sources: Vec<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable keyframe recording and export
    #[arg(long)]
    no_recording: bool,

    /// Directory offered when saving the recording
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins when set
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match cli.config {
        Some(ref path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    config.apply_overrides(cli.sources, cli.no_recording, cli.export_dir);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("FlipCrop - Cropper"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FlipCrop",
        options,
        Box::new(|_cc| Ok(Box::new(FlipCropApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
