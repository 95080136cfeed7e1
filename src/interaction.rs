//! Interaction controller
//!
//! Selection and drag state machine for repositioning placements:
//!
//! ```text
//! Idle --down on P--> Selected(P) --down on P--> Dragging(P) --up--> Idle (commit)
//!   ^                     |                         |
//!   +----down on nothing--+------move, no button----+
//! ```
//!
//! Pointer coordinates arrive in display pixels and are divided by the scale
//! factor before any hit-test or commit. Placement geometry is only mutated
//! on pointer-up.

use crate::atlas::{GlyphAtlasIndex, GlyphRect};
use crate::compose::ScaleFactor;
use crate::placement::{PlacementId, PlacementStore};
use crate::raster::Region;

/// A point in source (page) pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a display-space pointer position to source space
    pub fn from_display(x: f64, y: f64, scale: ScaleFactor) -> Self {
        Self::new(scale.to_source(x), scale.to_source(y))
    }

    /// Convert back to display space
    pub fn to_display(self, scale: ScaleFactor) -> (f64, f64) {
        (scale.to_display(self.x), scale.to_display(self.y))
    }
}

/// The selected placement and its resolved glyph size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub id: PlacementId,
    pub width: u32,
    pub height: u32,
}

/// Grab point and current pointer of an active drag, in source space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub pointer: Point,
    /// Pointer minus placement origin at grab time
    pub offset: Point,
}

impl DragState {
    /// Where the placement origin would land if released now
    pub fn preview_origin(&self) -> Point {
        Point::new(self.pointer.x - self.offset.x, self.pointer.y - self.offset.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(Selection),
    Dragging(Selection, DragState),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Selected(_) => "selected",
            InteractionState::Dragging(..) => "dragging",
        }
    }
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing observable changed
    Unchanged,
    /// Selection or drag state changed; only the overlay needs redrawing
    OverlayChanged,
    /// A drag committed a new position; the typed layer must be rebuilt
    Committed { id: PlacementId, x: i32, y: i32 },
}

/// Kind of box drawn on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Selection,
    Drag,
}

/// A source-space box to draw on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBox {
    pub region: Region,
    pub kind: OverlayKind,
}

/// First placement in document order whose glyph rectangle contains `point`.
///
/// List order wins over paint order: when two placements overlap, the
/// earlier one is returned even though the later one is drawn on top.
pub fn hit_test(
    store: &PlacementStore,
    atlas: &GlyphAtlasIndex,
    point: Point,
) -> Option<(PlacementId, GlyphRect)> {
    store.iter().find_map(|(id, placement)| {
        let glyph = placement.glyph(atlas)?;
        let bounds = Region::new(
            placement.x as i64,
            placement.y as i64,
            glyph.width,
            glyph.height,
        );
        bounds.contains(point.x, point.y).then_some((id, glyph))
    })
}

/// Owns the selection/drag state
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The selected placement, whether or not it is being dragged
    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Selected(sel) | InteractionState::Dragging(sel, _) => Some(sel),
        }
    }

    pub fn drag(&self) -> Option<DragState> {
        match self.state {
            InteractionState::Dragging(_, drag) => Some(drag),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(..))
    }

    /// Drop any selection or drag
    pub fn clear(&mut self) -> Outcome {
        if self.state == InteractionState::Idle {
            return Outcome::Unchanged;
        }
        self.state = InteractionState::Idle;
        Outcome::OverlayChanged
    }

    /// Pointer pressed at display coordinates `(x, y)`
    pub fn pointer_down(
        &mut self,
        store: &PlacementStore,
        atlas: &GlyphAtlasIndex,
        x: f64,
        y: f64,
        scale: ScaleFactor,
    ) -> Outcome {
        let point = Point::from_display(x, y, scale);

        let Some((id, glyph)) = hit_test(store, atlas, point) else {
            tracing::debug!("Pointer down at ({:.1}, {:.1}) hit nothing", point.x, point.y);
            return self.clear();
        };

        let selection = Selection {
            id,
            width: glyph.width,
            height: glyph.height,
        };

        let already_selected = self.selection().is_some_and(|s| s.id == id);
        match (already_selected, store.get(id)) {
            (true, Some(placement)) => {
                let offset = Point::new(point.x - placement.x as f64, point.y - placement.y as f64);
                tracing::debug!(
                    "Start drag of placement {} with grab offset ({:.1}, {:.1})",
                    id.0,
                    offset.x,
                    offset.y
                );
                self.state = InteractionState::Dragging(
                    selection,
                    DragState {
                        pointer: point,
                        offset,
                    },
                );
            }
            _ => {
                tracing::debug!("Selected placement {}", id.0);
                self.state = InteractionState::Selected(selection);
            }
        }
        Outcome::OverlayChanged
    }

    /// Pointer moved to display coordinates `(x, y)`
    pub fn pointer_move(&mut self, x: f64, y: f64, button_held: bool, scale: ScaleFactor) -> Outcome {
        let InteractionState::Dragging(_, ref mut drag) = self.state else {
            return Outcome::Unchanged;
        };

        if !button_held {
            // The release happened somewhere we did not see it
            tracing::debug!("Pointer moved with no button held, abandoning drag");
            self.state = InteractionState::Idle;
            return Outcome::OverlayChanged;
        }

        drag.pointer = Point::from_display(x, y, scale);
        Outcome::OverlayChanged
    }

    /// Pointer released at display coordinates `(x, y)`.
    ///
    /// Commits the drag into `store`; the committed origin is rounded to the
    /// nearest source pixel.
    pub fn pointer_up(
        &mut self,
        store: &mut PlacementStore,
        x: f64,
        y: f64,
        scale: ScaleFactor,
    ) -> Outcome {
        let InteractionState::Dragging(selection, mut drag) = self.state else {
            return Outcome::Unchanged;
        };
        drag.pointer = Point::from_display(x, y, scale);
        self.state = InteractionState::Idle;

        let origin = drag.preview_origin();
        let (new_x, new_y) = (origin.x.round() as i32, origin.y.round() as i32);
        if !store.set_position(selection.id, new_x, new_y) {
            tracing::warn!("Drag committed to missing placement {}", selection.id.0);
            return Outcome::OverlayChanged;
        }

        tracing::debug!(
            "Committed placement {} at ({}, {})",
            selection.id.0,
            new_x,
            new_y
        );
        Outcome::Committed {
            id: selection.id,
            x: new_x,
            y: new_y,
        }
    }

    /// The box the overlay should show for the current state
    pub fn overlay_box(&self, store: &PlacementStore) -> Option<OverlayBox> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Selected(sel) => {
                let placement = store.get(sel.id)?;
                Some(OverlayBox {
                    region: Region::new(
                        placement.x as i64,
                        placement.y as i64,
                        sel.width,
                        sel.height,
                    ),
                    kind: OverlayKind::Selection,
                })
            }
            InteractionState::Dragging(sel, drag) => {
                let origin = drag.preview_origin();
                Some(OverlayBox {
                    region: Region::new(
                        origin.x.round() as i64,
                        origin.y.round() as i64,
                        sel.width,
                        sel.height,
                    ),
                    kind: OverlayKind::Drag,
                })
            }
        }
    }
}
