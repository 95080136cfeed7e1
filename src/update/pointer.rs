//! Pointer handlers
//!
//! Routes pointer events through the interaction controller. Only a drag
//! commit rebuilds the layers; everything else just redraws the overlay.

use crate::commands::Cmd;
use crate::interaction::Outcome;
use crate::messages::PointerMsg;
use crate::model::AppModel;

pub fn update_pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    // Nothing to hit-test against until the page is on screen
    if model.display.is_none() {
        model.interaction.clear();
        return None;
    }

    let scale = model.scale;
    let outcome = match msg {
        PointerMsg::Down { x, y } => {
            model
                .interaction
                .pointer_down(&model.placements, &model.atlas, x, y, scale)
        }
        PointerMsg::Move { x, y, button_held } => {
            model.interaction.pointer_move(x, y, button_held, scale)
        }
        PointerMsg::Up { x, y } => {
            model
                .interaction
                .pointer_up(&mut model.placements, x, y, scale)
        }
        PointerMsg::Cancel => model.interaction.clear(),
    };

    match outcome {
        Outcome::Unchanged => None,
        Outcome::OverlayChanged => {
            model.redraw_overlay();
            Some(Cmd::Redraw)
        }
        Outcome::Committed { .. } => {
            model.rerender();
            Some(Cmd::Redraw)
        }
    }
}
