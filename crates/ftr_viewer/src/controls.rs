use ftr_core::input::Key;
use ftr_render::ViewKind;

/// One discrete scene transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectView(ViewKind),
    ToggleQuad,
    TogglePanel,
    RotateLadder(i8),
    TiltLadder(i8),
    ExtendLadder,
    RetractLadder,
    Drive(i8),
    Orbit { theta: i8, gamma: i8 },
    ResetCamera,
    ToggleFill,
    Zoom(i8),
    StartBlinkers,
    GrowWheels,
    ShrinkWheels,
    AddStep,
    RemoveStep,
}

impl Action {
    pub fn for_key(key: Key) -> Option<Action> {
        let action = match key {
            Key::Digit1 => Action::SelectView(ViewKind::Front),
            Key::Digit2 => Action::SelectView(ViewKind::Left),
            Key::Digit3 => Action::SelectView(ViewKind::Top),
            Key::Digit4 => Action::SelectView(ViewKind::Axonometric),
            Key::Digit0 => Action::ToggleQuad,
            Key::H => Action::TogglePanel,
            Key::Q => Action::RotateLadder(1),
            Key::E => Action::RotateLadder(-1),
            Key::W => Action::TiltLadder(-1),
            Key::S => Action::TiltLadder(1),
            Key::O => Action::ExtendLadder,
            Key::P => Action::RetractLadder,
            Key::A => Action::Drive(-1),
            Key::D => Action::Drive(1),
            Key::Up => Action::Orbit { theta: 0, gamma: 1 },
            Key::Down => Action::Orbit {
                theta: 0,
                gamma: -1,
            },
            Key::Right => Action::Orbit { theta: 1, gamma: 0 },
            Key::Left => Action::Orbit {
                theta: -1,
                gamma: 0,
            },
            Key::R => Action::ResetCamera,
            Key::Space => Action::ToggleFill,
            Key::PageUp => Action::Zoom(1),
            Key::PageDown => Action::Zoom(-1),
            Key::L => Action::StartBlinkers,
            Key::I => Action::GrowWheels,
            Key::K => Action::ShrinkWheels,
            Key::M => Action::AddStep,
            Key::N => Action::RemoveStep,
            Key::Escape => return None,
        };
        Some(action)
    }
}

/// Look up a key by its `KeyboardEvent.key` name: lower-case characters
/// (`"a"`, `"0"`, `" "`) or named keys (`"ArrowUp"`, `"PageDown"`).
pub fn key_from_name(name: &str) -> Option<Key> {
    let key = match name {
        "0" => Key::Digit0,
        "1" => Key::Digit1,
        "2" => Key::Digit2,
        "3" => Key::Digit3,
        "4" => Key::Digit4,
        "h" => Key::H,
        "q" => Key::Q,
        "e" => Key::E,
        "w" => Key::W,
        "s" => Key::S,
        "o" => Key::O,
        "p" => Key::P,
        "a" => Key::A,
        "d" => Key::D,
        "r" => Key::R,
        "i" => Key::I,
        "k" => Key::K,
        "m" => Key::M,
        "n" => Key::N,
        "l" => Key::L,
        "ArrowUp" => Key::Up,
        "ArrowDown" => Key::Down,
        "ArrowLeft" => Key::Left,
        "ArrowRight" => Key::Right,
        " " => Key::Space,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Escape" => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Key legend shown in the control panel.
pub const BINDINGS: &[(&str, &str)] = &[
    ("1 2 3 4", "front / left / top / axonometric"),
    ("0", "toggle all views"),
    ("arrows", "orbit axonometric camera"),
    ("r", "reset camera"),
    ("wheel, PgUp/PgDn", "zoom"),
    ("a / d", "drive"),
    ("i / k", "wheel radius"),
    ("q / e", "rotate ladder"),
    ("w / s", "raise / lower ladder"),
    ("o / p", "extend / retract ladder"),
    ("m / n", "add / remove rung"),
    ("l", "blinkers"),
    ("space", "filled / wireframe"),
    ("h", "hide this panel"),
    ("Esc", "quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_browser_key_values() {
        assert_eq!(key_from_name("a"), Some(Key::A));
        assert_eq!(key_from_name(" "), Some(Key::Space));
        assert_eq!(key_from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_name("A"), None);
        assert_eq!(key_from_name("F1"), None);
    }

    #[test]
    fn escape_is_not_a_scene_action() {
        assert_eq!(Action::for_key(Key::Escape), None);
    }

    #[test]
    fn digits_select_views() {
        assert_eq!(
            Action::for_key(Key::Digit3),
            Some(Action::SelectView(ViewKind::Top))
        );
        assert_eq!(Action::for_key(Key::Digit0), Some(Action::ToggleQuad));
    }

    #[test]
    fn opposite_keys_map_to_opposite_directions() {
        assert_eq!(Action::for_key(Key::A), Some(Action::Drive(-1)));
        assert_eq!(Action::for_key(Key::D), Some(Action::Drive(1)));
        assert_eq!(Action::for_key(Key::W), Some(Action::TiltLadder(-1)));
        assert_eq!(Action::for_key(Key::S), Some(Action::TiltLadder(1)));
    }
}
