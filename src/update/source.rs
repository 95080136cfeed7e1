//! Decode notification handlers
//!
//! Each decode result is consumed once. A failure marks the source
//! unavailable and blanks the display; no retry is attempted here.

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::decode::SourceKind;
use crate::messages::SourceMsg;
use crate::model::{AppModel, SourceState};

/// Mark both sources pending and request their decodes
pub fn request_sources(model: &mut AppModel, page: PathBuf, font: PathBuf) -> Cmd {
    model.page = SourceState::Pending;
    model.font = SourceState::Pending;
    model.rerender();
    Cmd::batch(vec![
        Cmd::DecodeImage {
            source: SourceKind::Page,
            path: page,
        },
        Cmd::DecodeImage {
            source: SourceKind::Font,
            path: font,
        },
        Cmd::Redraw,
    ])
}

pub fn update_source(model: &mut AppModel, msg: SourceMsg) -> Option<Cmd> {
    match msg {
        SourceMsg::Decoded { source, result } => {
            match &result {
                Ok(raster) => tracing::info!(
                    "{} image ready ({}x{})",
                    source.name(),
                    raster.width(),
                    raster.height()
                ),
                Err(reason) => tracing::warn!("{} image unavailable: {}", source.name(), reason),
            }

            *model.source_mut(source) = SourceState::from(result);

            // A new page invalidates any selection geometry tied to the old one
            if source == SourceKind::Page {
                model.interaction.clear();
            }

            model.rerender();
            Some(Cmd::Redraw)
        }
    }
}
