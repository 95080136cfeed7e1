//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use collate::atlas::{GlyphAtlasIndex, GlyphRect};
use collate::config::CollateConfig;
use collate::decode::SourceKind;
use collate::messages::{Msg, SourceMsg};
use collate::model::AppModel;
use collate::placement::{Placement, PlacementStore};
use collate::raster::{RasterBuffer, WHITE};
use collate::update::update;

pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Opaque gray pixel with the given channel value
pub fn gray(v: u8) -> [u8; 4] {
    [v, v, v, 255]
}

/// Font raster: `width` x `height` white with a black square of `size` at `(x, y)`
pub fn font_with_square(width: u32, height: u32, x: u32, y: u32, size: u32) -> RasterBuffer {
    let mut font = RasterBuffer::white(width, height);
    for py in y..y + size {
        for px in x..x + size {
            font.set_pixel(px, py, BLACK);
        }
    }
    font
}

/// Atlas with style "A": 'x' is a 5x5 black square at (0, 0) of
/// [`test_font`], 'y' a 5x5 black square at (10, 0), 'z' a degenerate rect
pub fn test_atlas() -> GlyphAtlasIndex {
    GlyphAtlasIndex::new()
        .with_glyph("A", 'x', GlyphRect::new(0, 0, 5, 5))
        .with_glyph("A", 'y', GlyphRect::new(10, 0, 5, 5))
        .with_glyph("A", 'z', GlyphRect::new(0, 0, 0, 5))
}

/// 20x5 font raster matching [`test_atlas`]
pub fn test_font() -> RasterBuffer {
    let mut font = font_with_square(20, 5, 0, 0, 5);
    for py in 0..5 {
        for px in 10..15 {
            font.set_pixel(px, py, BLACK);
        }
    }
    font
}

pub fn placement(character: char, x: i32, y: i32) -> Placement {
    Placement::new("A", character, x, y)
}

pub fn store(placements: Vec<Placement>) -> PlacementStore {
    PlacementStore::new(placements)
}

/// Model with both rasters already decoded
pub fn test_model(page: RasterBuffer, placements: Vec<Placement>, scale: f64) -> AppModel {
    let config = CollateConfig {
        scale,
        ..CollateConfig::default()
    };
    let mut model = AppModel::new(test_atlas(), store(placements), &config);
    update(
        &mut model,
        Msg::Source(SourceMsg::Decoded {
            source: SourceKind::Page,
            result: Ok(page),
        }),
    );
    update(
        &mut model,
        Msg::Source(SourceMsg::Decoded {
            source: SourceKind::Font,
            result: Ok(test_font()),
        }),
    );
    model
}

/// 100x100 white page
pub fn blank_page() -> RasterBuffer {
    RasterBuffer::filled(100, 100, WHITE)
}
