//! Collate - facsimile collation engine
//!
//! This crate provides the core types and logic for typesetting glyphs cut
//! from a font raster over a scanned page, comparing the two, and moving
//! individual glyphs by direct manipulation. State changes follow the Elm
//! Architecture pattern.

pub mod atlas;
pub mod cli;
pub mod commands;
pub mod compose;
pub mod composite;
pub mod config;
pub mod config_paths;
pub mod decode;
pub mod error;
pub mod interaction;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod placement;
pub mod raster;
pub mod theme;
pub mod tracing;
pub mod typeset;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use atlas::{GlyphAtlasIndex, GlyphRect};
pub use commands::Cmd;
pub use compose::{DisplayMode, ScaleFactor};
pub use composite::BlendMode;
pub use config::CollateConfig;
pub use error::{CollateError, Result};
pub use messages::Msg;
pub use model::AppModel;
pub use placement::{Placement, PlacementId, PlacementStore};
pub use raster::{RasterBuffer, Region};
