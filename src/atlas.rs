//! Glyph atlas index
//!
//! Maps `(style, character)` to the rectangle inside the font raster that
//! holds that glyph's bitmap. Built once from a static metrics table and
//! immutable afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CollateError, Result};
use crate::raster::Region;

/// Source rectangle of one glyph inside the font raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphRect {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
}

impl GlyphRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle as a font-raster region
    pub fn region(&self) -> Region {
        Region::new(self.x as i64, self.y as i64, self.width, self.height)
    }

    /// A glyph with no pixels stamps nothing
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Raw metrics table as it appears on disk: style -> character key -> rect
type RawMetrics = HashMap<String, HashMap<String, GlyphRect>>;

/// Lookup table from style and character to glyph rectangle
#[derive(Debug, Clone, Default)]
pub struct GlyphAtlasIndex {
    styles: HashMap<String, HashMap<char, GlyphRect>>,
}

impl GlyphAtlasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and programmatic setups
    pub fn with_glyph(mut self, style: &str, character: char, rect: GlyphRect) -> Self {
        self.styles
            .entry(style.to_string())
            .or_default()
            .insert(character, rect);
        self
    }

    /// Resolve a glyph. `None` means no rendering exists for this pair.
    pub fn lookup(&self, style: &str, character: char) -> Option<GlyphRect> {
        self.styles.get(style)?.get(&character).copied()
    }

    /// Number of styles in the index
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Total number of glyphs across all styles
    pub fn glyph_count(&self) -> usize {
        self.styles.values().map(HashMap::len).sum()
    }

    /// Parse a JSON metrics table
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawMetrics = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Parse a YAML metrics table
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawMetrics = serde_yaml::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Load a metrics table from disk. `.yaml`/`.yml` files are parsed as
    /// YAML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let index = if crate::util::is_yaml_file(path) {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::info!(
            "Loaded glyph metrics from {} ({} styles, {} glyphs)",
            path.display(),
            index.style_count(),
            index.glyph_count()
        );
        Ok(index)
    }

    fn from_raw(raw: RawMetrics) -> Result<Self> {
        let mut styles = HashMap::with_capacity(raw.len());
        for (style, glyphs) in raw {
            let mut table = HashMap::with_capacity(glyphs.len());
            for (key, rect) in glyphs {
                let mut chars = key.chars();
                let character = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(CollateError::InvalidGlyphKey {
                            style: style.clone(),
                            key,
                        })
                    }
                };
                table.insert(character, rect);
            }
            styles.insert(style, table);
        }
        Ok(Self { styles })
    }
}
