//! View composer
//!
//! Selects one of the full-resolution buffers (page, typed layer, difference
//! layer) and blits it into a freshly allocated display raster at the
//! current scale factor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::atlas::GlyphAtlasIndex;
use crate::composite::difference;
use crate::error::{CollateError, Result};
use crate::placement::PlacementStore;
use crate::raster::{RasterBuffer, TRANSPARENT};
use crate::typeset::{typeset, TypesetStats};

/// Which buffer the display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// The scanned page
    Page,
    /// The typed layer
    Type,
    /// Typed layer against page
    #[default]
    Diff,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Page, DisplayMode::Type, DisplayMode::Diff];

    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Page => "page",
            DisplayMode::Type => "type",
            DisplayMode::Diff => "diff",
        }
    }

    /// Cycle page -> type -> diff -> page
    pub fn next(&self) -> Self {
        match self {
            DisplayMode::Page => DisplayMode::Type,
            DisplayMode::Type => DisplayMode::Diff,
            DisplayMode::Diff => DisplayMode::Page,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = CollateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "page" => Ok(DisplayMode::Page),
            "type" | "typed" => Ok(DisplayMode::Type),
            "diff" | "difference" => Ok(DisplayMode::Diff),
            _ => Err(CollateError::UnknownDisplayMode(s.to_string())),
        }
    }
}

/// Uniform display multiplier. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Scales offered by the zoom buttons
    pub const PRESETS: [f64; 3] = [0.25, 0.5, 1.0];

    pub const ACTUAL_SIZE: ScaleFactor = ScaleFactor(1.0);

    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CollateError::InvalidScale(value))
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Display pixels -> source pixels
    #[inline]
    pub fn to_source(&self, display: f64) -> f64 {
        display / self.0
    }

    /// Source pixels -> display pixels
    #[inline]
    pub fn to_display(&self, source: f64) -> f64 {
        source * self.0
    }

    /// Zoom level as an integer percentage (0.25 -> 25)
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Button label, e.g. "50%"
    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(0.5)
    }
}

/// The full-resolution buffers derived from page, font and placements
#[derive(Debug, Clone)]
pub struct RenderedLayers {
    pub typed: RasterBuffer,
    pub difference: RasterBuffer,
    pub stats: TypesetStats,
}

impl RenderedLayers {
    /// Rebuild both derived layers from scratch
    pub fn render(
        page: &RasterBuffer,
        font: &RasterBuffer,
        atlas: &GlyphAtlasIndex,
        placements: &PlacementStore,
        overlap_warning: bool,
    ) -> Self {
        let (typed, stats) = typeset(
            page.width(),
            page.height(),
            font,
            atlas,
            placements,
            overlap_warning,
        );
        let difference = difference(&typed, page);
        Self {
            typed,
            difference,
            stats,
        }
    }

    /// The buffer shown for `mode`
    pub fn select<'a>(&'a self, mode: DisplayMode, page: &'a RasterBuffer) -> &'a RasterBuffer {
        match mode {
            DisplayMode::Page => page,
            DisplayMode::Type => &self.typed,
            DisplayMode::Diff => &self.difference,
        }
    }
}

/// Blit `source` into a new display raster of `source` dimensions x `scale`
pub fn compose(source: &RasterBuffer, scale: ScaleFactor) -> RasterBuffer {
    let (width, height) = source.scaled_size(scale.get());
    let mut display = RasterBuffer::filled(width, height, TRANSPARENT);
    source.blit_scaled(&mut display, scale.get(), 0, 0);
    display
}

/// Select the buffer for `mode` and compose it at `scale`
pub fn compose_view(
    mode: DisplayMode,
    scale: ScaleFactor,
    page: &RasterBuffer,
    layers: &RenderedLayers,
) -> RasterBuffer {
    compose(layers.select(mode, page), scale)
}
