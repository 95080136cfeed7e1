//! Glyph placements and the store that owns them
//!
//! The store is the single owner of the ordered placement list. The
//! typeset pass borrows it read-only; the interaction controller receives a
//! mutable borrow only when it commits a drag.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atlas::{GlyphAtlasIndex, GlyphRect};
use crate::error::Result;
use crate::raster::Region;

/// One glyph instance in page (source pixel) coordinates.
///
/// `x`, `y` is the top-left corner at which the glyph rectangle is stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub style: String,
    #[serde(rename = "char")]
    pub character: char,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(style: impl Into<String>, character: char, x: i32, y: i32) -> Self {
        Self {
            style: style.into(),
            character,
            x,
            y,
        }
    }

    /// Resolve this placement's glyph through the atlas
    pub fn glyph(&self, atlas: &GlyphAtlasIndex) -> Option<GlyphRect> {
        atlas.lookup(&self.style, self.character)
    }

    /// Page-space rectangle covered by this placement, if its glyph resolves
    pub fn bounds(&self, atlas: &GlyphAtlasIndex) -> Option<Region> {
        self.glyph(atlas)
            .map(|g| Region::new(self.x as i64, self.y as i64, g.width, g.height))
    }
}

/// Index of a placement in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(pub usize);

/// Ordered placement list with a version counter bumped on every mutation
#[derive(Debug, Clone, Default)]
pub struct PlacementStore {
    placements: Vec<Placement>,
    version: u64,
}

impl PlacementStore {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            version: 0,
        }
    }

    /// Parse a JSON placement list
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    /// Parse a YAML placement list
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(Self::new(serde_yaml::from_str(content)?))
    }

    /// Load a placement list from disk (`.yaml`/`.yml` as YAML, else JSON)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let store = if crate::util::is_yaml_file(path) {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::info!(
            "Loaded {} placements from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Mutation counter, starts at 0
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.get(id.0)
    }

    /// Placements in document order
    pub fn iter(&self) -> impl Iterator<Item = (PlacementId, &Placement)> {
        self.placements
            .iter()
            .enumerate()
            .map(|(i, p)| (PlacementId(i), p))
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.placements
    }

    /// Move a placement's origin. Returns false for an unknown id.
    pub fn set_position(&mut self, id: PlacementId, x: i32, y: i32) -> bool {
        let Some(placement) = self.placements.get_mut(id.0) else {
            return false;
        };
        placement.x = x;
        placement.y = y;
        self.version += 1;
        true
    }

    /// Replace the whole list (external reload)
    pub fn replace(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
        self.version += 1;
    }
}
