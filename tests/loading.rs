//! Input loading tests
//!
//! Glyph metrics, placement lists and image decoding from disk.

mod common;

use std::fs;

use collate::atlas::{GlyphAtlasIndex, GlyphRect};
use collate::decode::{decode_bytes, decode_image, save_png};
use collate::error::CollateError;
use collate::placement::{Placement, PlacementStore};
use collate::raster::RasterBuffer;
use common::{font_with_square, BLACK};
use tempfile::TempDir;

// ========================================================================
// Glyph metrics
// ========================================================================

const METRICS_JSON: &str = r#"{
    "A": { "x": { "x": 0, "y": 0, "w": 5, "h": 5 }, "y": { "x": 10, "y": 0, "w": 5, "h": 6 } },
    "B": { "x": { "x": 20, "y": 0, "w": 4, "h": 4 } }
}"#;

#[test]
fn test_atlas_from_json() {
    let atlas = GlyphAtlasIndex::from_json_str(METRICS_JSON).unwrap();
    assert_eq!(atlas.style_count(), 2);
    assert_eq!(atlas.glyph_count(), 3);
    assert_eq!(atlas.lookup("A", 'y'), Some(GlyphRect::new(10, 0, 5, 6)));
    assert_eq!(atlas.lookup("B", 'x'), Some(GlyphRect::new(20, 0, 4, 4)));
}

#[test]
fn test_atlas_lookup_misses() {
    let atlas = GlyphAtlasIndex::from_json_str(METRICS_JSON).unwrap();
    assert!(atlas.lookup("A", 'q').is_none());
    assert!(atlas.lookup("C", 'x').is_none());
}

#[test]
fn test_atlas_from_yaml() {
    let yaml = "A:\n  x: { x: 1, y: 2, w: 3, h: 4 }\n  \"é\": { x: 5, y: 0, w: 2, h: 2 }\n";
    let atlas = GlyphAtlasIndex::from_yaml_str(yaml).unwrap();
    assert_eq!(atlas.lookup("A", 'x'), Some(GlyphRect::new(1, 2, 3, 4)));
    assert_eq!(atlas.lookup("A", 'é'), Some(GlyphRect::new(5, 0, 2, 2)));
}

#[test]
fn test_atlas_rejects_multi_character_key() {
    let json = r#"{ "A": { "xy": { "x": 0, "y": 0, "w": 1, "h": 1 } } }"#;
    let err = GlyphAtlasIndex::from_json_str(json).unwrap_err();
    assert!(matches!(err, CollateError::InvalidGlyphKey { .. }));
}

#[test]
fn test_atlas_degenerate_rect_is_kept() {
    let json = r#"{ "A": { "x": { "x": 0, "y": 0, "w": 0, "h": 5 } } }"#;
    let atlas = GlyphAtlasIndex::from_json_str(json).unwrap();
    assert!(atlas.lookup("A", 'x').unwrap().is_degenerate());
}

#[test]
fn test_atlas_load_by_extension() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("metrics.json");
    fs::write(&json_path, METRICS_JSON).unwrap();
    let yaml_path = dir.path().join("metrics.yml");
    fs::write(&yaml_path, "A:\n  x: { x: 0, y: 0, w: 5, h: 5 }\n").unwrap();

    assert_eq!(GlyphAtlasIndex::load(&json_path).unwrap().glyph_count(), 3);
    assert_eq!(GlyphAtlasIndex::load(&yaml_path).unwrap().glyph_count(), 1);
}

#[test]
fn test_atlas_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = GlyphAtlasIndex::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CollateError::Io(_)));
}

// ========================================================================
// Placements
// ========================================================================

#[test]
fn test_placements_from_json_keep_order() {
    let json = r#"[
        { "style": "A", "char": "x", "x": 10, "y": 10 },
        { "style": "A", "char": "y", "x": -3, "y": 40 }
    ]"#;
    let store = PlacementStore::from_json_str(json).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.as_slice(),
        &[Placement::new("A", 'x', 10, 10), Placement::new("A", 'y', -3, 40)]
    );
    assert_eq!(store.version(), 0);
}

#[test]
fn test_placements_load_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("placements.yaml");
    fs::write(&path, "- { style: A, char: x, x: 1, y: 2 }\n").unwrap();
    let store = PlacementStore::load(&path).unwrap();
    assert_eq!(store.as_slice(), &[Placement::new("A", 'x', 1, 2)]);
}

#[test]
fn test_placements_bad_json() {
    let err = PlacementStore::from_json_str("[{ \"style\": \"A\" }]").unwrap_err();
    assert!(matches!(err, CollateError::Json(_)));
}

// ========================================================================
// Images
// ========================================================================

#[test]
fn test_png_save_and_decode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("font.png");
    let font = font_with_square(8, 6, 1, 1, 3);

    save_png(&font, &path).unwrap();
    let decoded = decode_image(&path).unwrap();
    assert_eq!(decoded.dimensions(), (8, 6));
    assert_eq!(decoded.pixel(2, 2), Some(BLACK));
    assert_eq!(decoded, font);
}

#[test]
fn test_decode_missing_file_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let err = decode_image(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, CollateError::Decode { .. }));
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn test_decode_garbage_bytes() {
    assert!(matches!(
        decode_bytes(b"definitely not an image"),
        Err(CollateError::Decode { .. })
    ));
}

#[test]
fn test_decode_bytes_reads_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.png");
    save_png(&RasterBuffer::white(3, 2), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(decode_bytes(&bytes).unwrap(), RasterBuffer::white(3, 2));
}
