//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Page, font, metrics and placement inputs
//! - Overriding the configured scale, display mode and stamping mode
//! - An alternate config file

use clap::Parser;
use std::path::PathBuf;

use crate::compose::{DisplayMode, ScaleFactor};
use crate::config::CollateConfig;
use crate::util::is_image_file;

/// Typeset glyphs over a scanned page and compare
#[derive(Parser, Debug)]
#[command(
    name = "collate",
    version,
    about = "Typeset glyphs over a scanned page and compare"
)]
pub struct CliArgs {
    /// Scanned page image
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Font raster the glyphs are cut from
    #[arg(value_name = "FONT")]
    pub font: PathBuf,

    /// Glyph metrics (JSON or YAML, style -> char -> {x, y, w, h})
    #[arg(value_name = "METRICS")]
    pub metrics: PathBuf,

    /// Placement list (JSON or YAML)
    #[arg(value_name = "PLACEMENTS")]
    pub placements: PathBuf,

    /// Display scale, e.g. 0.25, 0.5 or 1
    #[arg(short, long, value_name = "FACTOR")]
    pub scale: Option<f64>,

    /// Initial display mode (page, type, diff)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Stamp glyphs in overlap-warning mode
    #[arg(short = 'o', long)]
    pub overlap_warning: bool,

    /// Read settings from this file instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Everything the viewer needs to start
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub page: PathBuf,
    pub font: PathBuf,
    pub metrics: PathBuf,
    pub placements: PathBuf,
    /// Stored settings with command-line overrides applied
    pub settings: CollateConfig,
}

impl CliArgs {
    /// Load the base settings this invocation starts from
    pub fn load_settings(&self) -> CollateConfig {
        match &self.config {
            Some(path) => CollateConfig::load_from(path),
            None => CollateConfig::load(),
        }
    }

    /// Apply command-line overrides on top of `base`
    pub fn into_config(self, base: CollateConfig) -> Result<StartupConfig, String> {
        let mut settings = base;

        if let Some(scale) = self.scale {
            ScaleFactor::new(scale).map_err(|e| e.to_string())?;
            settings.scale = scale;
        }

        if let Some(mode) = &self.mode {
            settings.display_mode = mode.parse::<DisplayMode>().map_err(|e| e.to_string())?;
        }

        if self.overlap_warning {
            settings.overlap_warning = true;
        }

        for path in [&self.page, &self.font] {
            if !is_image_file(path) {
                tracing::warn!("{} does not look like an image file", path.display());
            }
        }

        Ok(StartupConfig {
            page: self.page,
            font: self.font,
            metrics: self.metrics,
            placements: self.placements,
            settings,
        })
    }
}
