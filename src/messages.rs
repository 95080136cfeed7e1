//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::compose::DisplayMode;
use crate::decode::SourceKind;
use crate::placement::Placement;
use crate::raster::RasterBuffer;

/// One-shot decode notifications, posted back by the runtime
#[derive(Debug, Clone)]
pub enum SourceMsg {
    /// A page or font decode finished (`Err` carries the failure reason)
    Decoded {
        source: SourceKind,
        result: Result<RasterBuffer, String>,
    },
}

/// Pointer input in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMsg {
    /// Primary button pressed
    Down { x: f64, y: f64 },
    /// Pointer moved; `button_held` is the primary button state
    Move { x: f64, y: f64, button_held: bool },
    /// Primary button released
    Up { x: f64, y: f64 },
    /// Drop selection and any drag in progress (Escape)
    Cancel,
}

/// Display commands from the host UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMsg {
    /// Show page, typed layer or difference
    SetDisplayMode(DisplayMode),
    /// page -> type -> diff -> page
    CycleDisplayMode,
    /// Flip between ink-union and overlap-warning stamping
    ToggleOverlapWarning,
    /// Set the display scale; non-positive values are rejected
    SetScale(f64),
}

/// Placement list changes from outside the interaction controller
#[derive(Debug, Clone)]
pub enum PlacementMsg {
    /// Replace the whole list (external reload)
    Replace(Vec<Placement>),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Source(SourceMsg),
    Pointer(PointerMsg),
    View(ViewMsg),
    Placements(PlacementMsg),
}
