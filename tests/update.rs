//! Message flow tests
//!
//! Decode notifications, pointer gestures and view commands routed through
//! `update`, checked against the display and overlay rasters they produce.

mod common;

use collate::commands::Cmd;
use collate::compose::DisplayMode;
use collate::config::CollateConfig;
use collate::decode::SourceKind;
use collate::messages::{Msg, PlacementMsg, PointerMsg, SourceMsg, ViewMsg};
use collate::model::{AppModel, SourceState};
use collate::placement::PlacementId;
use collate::raster::{RasterBuffer, WHITE};
use collate::update::{request_sources, update};
use common::{blank_page, placement, store, test_atlas, test_font, test_model, BLACK};

fn pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    update(model, Msg::Pointer(msg))
}

fn view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    update(model, Msg::View(msg))
}

// ========================================================================
// Source loading
// ========================================================================

#[test]
fn test_nothing_rendered_until_both_sources_decode() {
    let mut model = AppModel::new(
        test_atlas(),
        store(vec![placement('x', 10, 10)]),
        &CollateConfig::default(),
    );
    assert!(model.display.is_none());
    assert_eq!(model.status_line(), "loading page image…");

    let cmd = update(
        &mut model,
        Msg::Source(SourceMsg::Decoded {
            source: SourceKind::Page,
            result: Ok(blank_page()),
        }),
    );
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert!(model.display.is_none());
    assert_eq!(model.status_line(), "loading font image…");

    update(
        &mut model,
        Msg::Source(SourceMsg::Decoded {
            source: SourceKind::Font,
            result: Ok(test_font()),
        }),
    );
    assert!(model.display.is_some());
    assert_eq!(model.generation, 1);
}

#[test]
fn test_decode_failure_reports_unavailable() {
    let mut model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);
    assert!(model.display.is_some());

    update(
        &mut model,
        Msg::Source(SourceMsg::Decoded {
            source: SourceKind::Font,
            result: Err("truncated file".to_string()),
        }),
    );
    assert!(matches!(model.font, SourceState::Unavailable(_)));
    assert!(model.display.is_none());
    assert!(model.layers.is_none());
    assert_eq!(model.status_line(), "font image unavailable: truncated file");
    assert_eq!(model.overlay.dimensions(), (0, 0));
}

#[test]
fn test_request_sources_batches_decodes() {
    let mut model = test_model(blank_page(), vec![], 1.0);
    let cmd = request_sources(&mut model, "page.png".into(), "font.png".into());

    assert!(model.page.is_pending());
    assert!(model.font.is_pending());
    assert!(model.display.is_none());
    match cmd {
        Cmd::Batch(cmds) => {
            assert_eq!(cmds.len(), 3);
            assert!(matches!(
                &cmds[0],
                Cmd::DecodeImage {
                    source: SourceKind::Page,
                    ..
                }
            ));
            assert!(matches!(
                &cmds[1],
                Cmd::DecodeImage {
                    source: SourceKind::Font,
                    ..
                }
            ));
        }
        other => panic!("Expected batch, got {:?}", other),
    }
}

// ========================================================================
// View commands
// ========================================================================

#[test]
fn test_default_mode_shows_difference() {
    let model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);
    let display = model.display.as_ref().unwrap();
    assert_eq!(model.display_mode, DisplayMode::Diff);
    assert_eq!(display.pixel(12, 12), Some([0, 102, 0, 255]));
    assert_eq!(display.pixel(50, 50), Some(WHITE));
}

#[test]
fn test_display_modes_select_buffers() {
    let mut model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);

    view(&mut model, ViewMsg::SetDisplayMode(DisplayMode::Type));
    assert_eq!(model.display.as_ref().unwrap().pixel(12, 12), Some(BLACK));

    view(&mut model, ViewMsg::SetDisplayMode(DisplayMode::Page));
    assert_eq!(model.display.as_ref().unwrap().pixel(12, 12), Some(WHITE));

    // Switching modes reuses the rendered layers
    assert_eq!(model.generation, 1);
}

#[test]
fn test_setting_same_mode_is_noop() {
    let mut model = test_model(blank_page(), vec![], 1.0);
    assert_eq!(view(&mut model, ViewMsg::SetDisplayMode(DisplayMode::Diff)), None);
}

#[test]
fn test_cycle_display_mode() {
    let mut model = test_model(blank_page(), vec![], 1.0);
    view(&mut model, ViewMsg::CycleDisplayMode);
    assert_eq!(model.display_mode, DisplayMode::Page);
    view(&mut model, ViewMsg::CycleDisplayMode);
    assert_eq!(model.display_mode, DisplayMode::Type);
    view(&mut model, ViewMsg::CycleDisplayMode);
    assert_eq!(model.display_mode, DisplayMode::Diff);
}

#[test]
fn test_quarter_scale_display_dimensions() {
    let page = RasterBuffer::white(400, 200);
    let mut model = test_model(page, vec![placement('x', 98, 98)], 1.0);
    assert_eq!(model.display_size(), (400, 200));

    let cmd = view(&mut model, ViewMsg::SetScale(0.25));
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.display_size(), (100, 50));
    assert_eq!(model.overlay.dimensions(), (100, 50));

    // Display (25, 25) is source (100, 100), inside the placement
    pointer(&mut model, PointerMsg::Down { x: 25.0, y: 25.0 });
    assert_eq!(
        model.interaction.selection().map(|s| s.id),
        Some(PlacementId(0))
    );
}

#[test]
fn test_repeated_scale_changes_do_not_compound() {
    let mut model = test_model(RasterBuffer::white(200, 100), vec![], 1.0);
    for _ in 0..3 {
        view(&mut model, ViewMsg::SetScale(0.5));
        view(&mut model, ViewMsg::SetScale(1.0));
    }
    assert_eq!(model.display_size(), (200, 100));
    view(&mut model, ViewMsg::SetScale(0.25));
    assert_eq!(model.display_size(), (50, 25));
}

#[test]
fn test_invalid_scale_is_ignored() {
    let mut model = test_model(blank_page(), vec![], 1.0);
    assert_eq!(view(&mut model, ViewMsg::SetScale(0.0)), None);
    assert_eq!(view(&mut model, ViewMsg::SetScale(-1.0)), None);
    assert_eq!(view(&mut model, ViewMsg::SetScale(f64::NAN)), None);
    assert_eq!(model.display_size(), (100, 100));
}

#[test]
fn test_toggle_overlap_warning_rerenders() {
    let mut model = test_model(
        blank_page(),
        vec![placement('x', 5, 5), placement('y', 7, 7)],
        1.0,
    );
    view(&mut model, ViewMsg::SetDisplayMode(DisplayMode::Type));
    assert_eq!(model.display.as_ref().unwrap().pixel(8, 8), Some(BLACK));

    view(&mut model, ViewMsg::ToggleOverlapWarning);
    assert!(model.overlap_warning);
    assert_eq!(model.generation, 2);
    assert_eq!(
        model.display.as_ref().unwrap().pixel(8, 8),
        Some([255, 0, 0, 255])
    );
    assert!(model.status_line().contains("[overlap]"));
}

#[test]
fn test_status_line_reports_unmapped() {
    let model = test_model(
        blank_page(),
        vec![placement('x', 1, 1), placement('?', 1, 1)],
        0.5,
    );
    assert_eq!(model.status_line(), "diff @ 50% (1 unmapped)");
}

// ========================================================================
// Pointer flow
// ========================================================================

#[test]
fn test_drag_commit_rerenders_typed_layer() {
    let mut model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);
    view(&mut model, ViewMsg::SetDisplayMode(DisplayMode::Type));

    pointer(&mut model, PointerMsg::Down { x: 12.0, y: 12.0 });
    pointer(&mut model, PointerMsg::Down { x: 12.0, y: 12.0 });
    pointer(
        &mut model,
        PointerMsg::Move {
            x: 18.0,
            y: 18.0,
            button_held: true,
        },
    );
    // Still the old layer while dragging
    assert_eq!(model.generation, 1);
    assert_eq!(model.display.as_ref().unwrap().pixel(10, 10), Some(BLACK));

    let cmd = pointer(&mut model, PointerMsg::Up { x: 22.0, y: 22.0 });
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(model.generation, 2);
    assert_eq!(model.placements.version(), 1);

    let display = model.display.as_ref().unwrap();
    assert_eq!(display.pixel(10, 10), Some(WHITE));
    assert_eq!(display.pixel(20, 20), Some(BLACK));
    assert_eq!(display.pixel(24, 24), Some(BLACK));
}

#[test]
fn test_selection_draws_overlay() {
    let mut model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);
    assert!(model.overlay.pixels().iter().all(|&b| b == 0));

    let cmd = pointer(&mut model, PointerMsg::Down { x: 12.0, y: 12.0 });
    assert_eq!(cmd, Some(Cmd::Redraw));
    let selection = model.theme.selection.to_rgba();
    assert_eq!(model.overlay.pixel(10, 10), Some(selection));
    assert_eq!(model.overlay.pixel(14, 14), Some(selection));
    assert_eq!(model.overlay.pixel(30, 30), Some([0, 0, 0, 0]));

    // Selection never triggers a layer rebuild
    assert_eq!(model.generation, 1);

    pointer(&mut model, PointerMsg::Cancel);
    assert!(model.overlay.pixels().iter().all(|&b| b == 0));
}

#[test]
fn test_pointer_ignored_without_display() {
    let mut model = AppModel::new(
        test_atlas(),
        store(vec![placement('x', 10, 10)]),
        &CollateConfig::default(),
    );
    assert_eq!(pointer(&mut model, PointerMsg::Down { x: 5.0, y: 5.0 }), None);
    assert!(model.interaction.selection().is_none());
}

#[test]
fn test_replace_placements_clears_selection() {
    let mut model = test_model(blank_page(), vec![placement('x', 10, 10)], 1.0);
    pointer(&mut model, PointerMsg::Down { x: 12.0, y: 12.0 });
    assert!(model.interaction.selection().is_some());

    update(
        &mut model,
        Msg::Placements(PlacementMsg::Replace(vec![placement('y', 40, 40)])),
    );
    assert!(model.interaction.selection().is_none());
    assert_eq!(model.placements.len(), 1);
    assert_eq!(model.generation, 2);
}
