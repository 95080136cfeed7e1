//! Placement renderer tests

mod common;

use collate::composite::difference;
use collate::raster::{RasterBuffer, WHITE};
use collate::typeset::{stamp_mode, typeset};
use collate::BlendMode;
use common::{blank_page, placement, store, test_atlas, test_font, BLACK};

#[test]
fn test_single_glyph_stamped_at_placement() {
    let (typed, stats) = typeset(
        100,
        100,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('x', 10, 10)]),
        false,
    );

    assert_eq!(typed.dimensions(), (100, 100));
    assert_eq!(stats.stamped, 1);
    for y in 0..100 {
        for x in 0..100 {
            let inside = (10..15).contains(&x) && (10..15).contains(&y);
            let expected = if inside { BLACK } else { WHITE };
            assert_eq!(typed.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_difference_marks_typed_square() {
    let page = blank_page();
    let (typed, _) = typeset(
        100,
        100,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('x', 10, 10)]),
        false,
    );
    let diff = difference(&typed, &page);

    assert_ne!(diff.pixel(12, 12), page.pixel(12, 12));
    assert_eq!(diff.pixel(50, 50), Some(WHITE));
}

#[test]
fn test_unmapped_glyph_is_skipped() {
    let (typed, stats) = typeset(
        100,
        100,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('?', 10, 10), placement('x', 30, 30)]),
        false,
    );

    assert_eq!(stats.unmapped, 1);
    assert_eq!(stats.stamped, 1);
    assert_eq!(typed.pixel(10, 10), Some(WHITE));
    assert_eq!(typed.pixel(30, 30), Some(BLACK));
}

#[test]
fn test_unknown_style_is_skipped() {
    let mut p = placement('x', 10, 10);
    p.style = "Fraktur".to_string();
    let (typed, stats) = typeset(20, 20, &test_font(), &test_atlas(), &store(vec![p]), false);
    assert_eq!(stats.unmapped, 1);
    assert_eq!(typed, RasterBuffer::white(20, 20));
}

#[test]
fn test_degenerate_glyph_is_noop() {
    let (typed, stats) = typeset(
        20,
        20,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('z', 2, 2)]),
        false,
    );
    assert_eq!(stats.empty, 1);
    assert_eq!(typed, RasterBuffer::white(20, 20));
}

#[test]
fn test_off_page_placement_is_clipped() {
    let (typed, stats) = typeset(
        20,
        20,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('x', 18, -3), placement('y', 40, 40)]),
        false,
    );
    assert_eq!(stats.stamped, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(typed.pixel(19, 0), Some(BLACK));
    assert_eq!(typed.pixel(19, 1), Some(BLACK));
    assert_eq!(typed.pixel(19, 2), Some(WHITE));
    assert_eq!(typed.pixel(17, 0), Some(WHITE));
}

#[test]
fn test_overlapping_glyphs_union_ink() {
    let (typed, _) = typeset(
        30,
        30,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('x', 5, 5), placement('y', 7, 7)]),
        false,
    );
    assert_eq!(typed.pixel(8, 8), Some(BLACK));
    assert_eq!(typed.pixel(5, 5), Some(BLACK));
    assert_eq!(typed.pixel(11, 11), Some(BLACK));
}

#[test]
fn test_overlap_warning_marks_collisions_red() {
    let (typed, _) = typeset(
        30,
        30,
        &test_font(),
        &test_atlas(),
        &store(vec![placement('x', 5, 5), placement('y', 7, 7)]),
        true,
    );
    // Collision area
    assert_eq!(typed.pixel(8, 8), Some([255, 0, 0, 255]));
    // Single coverage stays black
    assert_eq!(typed.pixel(5, 5), Some(BLACK));
    assert_eq!(typed.pixel(11, 11), Some(BLACK));
    assert_eq!(typed.pixel(20, 20), Some(WHITE));
}

#[test]
fn test_stamp_mode_selection() {
    assert_eq!(stamp_mode(false), BlendMode::MaxInk);
    assert_eq!(stamp_mode(true), BlendMode::OverlapWarn);
}

#[test]
fn test_typeset_is_repeatable() {
    let placements = store(vec![placement('x', 1, 1), placement('y', 3, 2)]);
    let first = typeset(12, 12, &test_font(), &test_atlas(), &placements, true);
    let second = typeset(12, 12, &test_font(), &test_atlas(), &placements, true);
    assert_eq!(first, second);
}
