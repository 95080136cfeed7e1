//! Display command handlers

use crate::commands::Cmd;
use crate::compose::ScaleFactor;
use crate::messages::ViewMsg;
use crate::model::AppModel;

pub fn update_view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::SetDisplayMode(mode) => {
            if model.display_mode == mode {
                return None;
            }
            model.display_mode = mode;
            model.recompose();
            Some(Cmd::Redraw)
        }

        ViewMsg::CycleDisplayMode => {
            model.display_mode = model.display_mode.next();
            model.recompose();
            Some(Cmd::Redraw)
        }

        ViewMsg::ToggleOverlapWarning => {
            model.overlap_warning = !model.overlap_warning;
            tracing::debug!("Overlap warning {}", model.overlap_warning);
            model.rerender();
            Some(Cmd::Redraw)
        }

        ViewMsg::SetScale(value) => {
            let scale = match ScaleFactor::new(value) {
                Ok(scale) => scale,
                Err(e) => {
                    tracing::warn!("{}", e);
                    return None;
                }
            };
            if scale == model.scale {
                return None;
            }
            model.scale = scale;
            model.recompose();
            Some(Cmd::Redraw)
        }
    }
}
