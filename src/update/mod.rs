//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod placements;
mod pointer;
mod source;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::InteractionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use placements::update_placements;
pub use pointer::update_pointer;
pub use source::{request_sources, update_source};
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Source(m) => source::update_source(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::View(m) => view::update_view(model, m),
        Msg::Placements(m) => placements::update_placements(model, m),
    }
}

#[cfg(debug_assertions)]
fn snapshot(model: &AppModel) -> InteractionSnapshot {
    InteractionSnapshot {
        state: *model.interaction.state(),
        placements_version: model.placements.version(),
        generation: model.generation,
    }
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let span = span!(Level::DEBUG, "update", msg = %msg_name);
    let _guard = span.enter();

    let before = snapshot(model);
    let result = update_inner(model, msg);
    let after = snapshot(model);

    if let Some(diff) = before.diff(&after) {
        debug!(target: "interaction", "{}", diff);
    }

    result
}

/// Short message label for span fields
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{PlacementMsg, PointerMsg, SourceMsg};

    match msg {
        Msg::Source(SourceMsg::Decoded { source, result }) => format!(
            "Source::Decoded({}, {})",
            source.name(),
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::Pointer(PointerMsg::Down { .. }) => "Pointer::Down".to_string(),
        Msg::Pointer(PointerMsg::Move { .. }) => "Pointer::Move".to_string(),
        Msg::Pointer(PointerMsg::Up { .. }) => "Pointer::Up".to_string(),
        Msg::Pointer(PointerMsg::Cancel) => "Pointer::Cancel".to_string(),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Placements(PlacementMsg::Replace(list)) => {
            format!("Placements::Replace({})", list.len())
        }
    }
}
