//! Viewer configuration persistence
//!
//! Stores user preferences in `~/.config/collate/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::{DisplayMode, ScaleFactor};
use crate::theme::{Color, OverlayTheme};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateConfig {
    /// Initial display scale (0.25, 0.5, 1.0 or any positive value)
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Initial display mode
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// Stamp glyphs in overlap-warning mode
    #[serde(default)]
    pub overlap_warning: bool,
    /// Selection box color
    #[serde(default = "default_selection_color")]
    pub selection_color: String,
    /// Drag preview box color
    #[serde(default = "default_drag_color")]
    pub drag_color: String,
    /// Window background around the page
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_scale() -> f64 {
    0.5
}

fn default_selection_color() -> String {
    "#3B82F6".to_string()
}

fn default_drag_color() -> String {
    "#EF4444".to_string()
}

fn default_background() -> String {
    "#2B2B2B".to_string()
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            display_mode: DisplayMode::default(),
            overlap_warning: false,
            selection_color: default_selection_color(),
            drag_color: default_drag_color(),
            background: default_background(),
        }
    }
}

impl CollateConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if it is missing
    /// or malformed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validated scale; an invalid value falls back to the default
    pub fn scale_factor(&self) -> ScaleFactor {
        ScaleFactor::new(self.scale).unwrap_or_else(|e| {
            tracing::warn!("{}, using default scale", e);
            ScaleFactor::default()
        })
    }

    /// Resolved overlay colors; unparsable entries keep their defaults
    pub fn overlay_theme(&self) -> OverlayTheme {
        let defaults = OverlayTheme::default();
        let parse = |hex: &str, fallback: Color| {
            Color::from_hex(hex).unwrap_or_else(|e| {
                tracing::warn!("Invalid color {:?} in config: {}", hex, e);
                fallback
            })
        };
        OverlayTheme {
            selection: parse(&self.selection_color, defaults.selection),
            drag: parse(&self.drag_color, defaults.drag),
            background: parse(&self.background, defaults.background),
        }
    }
}
