//! Placement list handlers

use crate::commands::Cmd;
use crate::messages::PlacementMsg;
use crate::model::AppModel;

pub fn update_placements(model: &mut AppModel, msg: PlacementMsg) -> Option<Cmd> {
    match msg {
        PlacementMsg::Replace(list) => {
            // Ids index the old list; a held selection would point elsewhere
            model.interaction.clear();
            model.placements.replace(list);
            model.rerender();
            Some(Cmd::Redraw)
        }
    }
}
