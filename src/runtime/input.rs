//! Keyboard input handling
//!
//! The viewer has a handful of single-key bindings:
//! - `P` / `T` / `D` show page, typed layer or difference
//! - `Tab` cycles the display mode
//! - `O` toggles overlap-warning stamping
//! - `1` / `2` / `3` pick the 25% / 50% / 100% scale
//! - `Escape` drops the selection

use winit::keyboard::{Key, NamedKey};

use collate::commands::Cmd;
use collate::compose::{DisplayMode, ScaleFactor};
use collate::messages::{Msg, PointerMsg, ViewMsg};
use collate::model::AppModel;
use collate::update::update;

/// Map a key press to a message, if it is bound
pub fn key_to_msg(key: &Key) -> Option<Msg> {
    match key {
        Key::Named(NamedKey::Tab) => Some(Msg::View(ViewMsg::CycleDisplayMode)),
        Key::Named(NamedKey::Escape) => Some(Msg::Pointer(PointerMsg::Cancel)),
        Key::Character(s) => {
            let view = match s.to_ascii_lowercase().as_str() {
                "p" => ViewMsg::SetDisplayMode(DisplayMode::Page),
                "t" => ViewMsg::SetDisplayMode(DisplayMode::Type),
                "d" => ViewMsg::SetDisplayMode(DisplayMode::Diff),
                "o" => ViewMsg::ToggleOverlapWarning,
                "1" => ViewMsg::SetScale(ScaleFactor::PRESETS[0]),
                "2" => ViewMsg::SetScale(ScaleFactor::PRESETS[1]),
                "3" => ViewMsg::SetScale(ScaleFactor::PRESETS[2]),
                _ => return None,
            };
            Some(Msg::View(view))
        }
        _ => None,
    }
}

/// Handle a key press
pub fn handle_key(model: &mut AppModel, key: &Key) -> Option<Cmd> {
    let msg = key_to_msg(key)?;
    update(model, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keys() {
        let msg = key_to_msg(&Key::Character("P".into()));
        assert!(matches!(
            msg,
            Some(Msg::View(ViewMsg::SetDisplayMode(DisplayMode::Page)))
        ));
        let msg = key_to_msg(&Key::Character("d".into()));
        assert!(matches!(
            msg,
            Some(Msg::View(ViewMsg::SetDisplayMode(DisplayMode::Diff)))
        ));
    }

    #[test]
    fn test_scale_keys() {
        let msg = key_to_msg(&Key::Character("1".into()));
        assert!(matches!(msg, Some(Msg::View(ViewMsg::SetScale(s))) if s == 0.25));
    }

    #[test]
    fn test_unbound_key() {
        assert!(key_to_msg(&Key::Character("z".into())).is_none());
        assert!(key_to_msg(&Key::Named(NamedKey::Enter)).is_none());
    }
}
