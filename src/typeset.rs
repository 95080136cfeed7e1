//! Placement renderer
//!
//! Builds the typed layer: a page-sized white raster onto which every
//! placement's glyph is stamped from the font raster, in document order.
//! The pass is never incremental; each call allocates a fresh layer.

use std::time::Instant;

use crate::atlas::GlyphAtlasIndex;
use crate::composite::{composite, BlendMode};
use crate::placement::PlacementStore;
use crate::raster::{RasterBuffer, Region};

/// Counters from one typeset pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypesetStats {
    /// Glyphs that wrote at least one pixel
    pub stamped: usize,
    /// Placements whose (style, character) has no atlas entry
    pub unmapped: usize,
    /// Glyphs with a zero-area rectangle, or stamped entirely off the page
    pub empty: usize,
}

/// Blend mode used to stamp glyphs
pub fn stamp_mode(overlap_warning: bool) -> BlendMode {
    if overlap_warning {
        BlendMode::OverlapWarn
    } else {
        BlendMode::MaxInk
    }
}

/// Render the typed layer for a page of `width` x `height` pixels.
pub fn typeset(
    width: u32,
    height: u32,
    font: &RasterBuffer,
    atlas: &GlyphAtlasIndex,
    placements: &PlacementStore,
    overlap_warning: bool,
) -> (RasterBuffer, TypesetStats) {
    let start = Instant::now();
    let mode = stamp_mode(overlap_warning);
    let mut layer = RasterBuffer::white(width, height);
    let mut stats = TypesetStats::default();

    for (id, placement) in placements.iter() {
        let Some(glyph) = placement.glyph(atlas) else {
            tracing::trace!(
                "No glyph for style {:?} char {:?} (placement {})",
                placement.style,
                placement.character,
                id.0
            );
            stats.unmapped += 1;
            continue;
        };

        let source: Region = glyph.region();
        match composite(
            mode,
            font,
            source,
            &mut layer,
            placement.x as i64,
            placement.y as i64,
        ) {
            Some(_) => stats.stamped += 1,
            None => stats.empty += 1,
        }
    }

    tracing::debug!(
        "Typeset {}x{} with {}: {} stamped, {} unmapped, {} empty in {:?}",
        width,
        height,
        mode.name(),
        stats.stamped,
        stats.unmapped,
        stats.empty,
        start.elapsed()
    );

    (layer, stats)
}
