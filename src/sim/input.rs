//! Keyboard to control mapping
//!
//! Key events arrive whenever the browser delivers them; the simulation only
//! ever sees the latest value of each control when it takes a snapshot.

use serde::{Deserialize, Serialize};

/// Logical controls the ship understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

impl Control {
    /// Map a `KeyboardEvent.code` to a control
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Control::TurnLeft),
            "ArrowRight" | "KeyD" => Some(Control::TurnRight),
            "ArrowUp" | "KeyW" => Some(Control::Thrust),
            "KeyX" | "Period" => Some(Control::Fire),
            _ => None,
        }
    }

    /// Map a legacy numeric `KeyboardEvent.keyCode` to a control
    pub fn from_legacy_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            37 | 65 => Some(Control::TurnLeft), // left arrow, A
            39 | 68 => Some(Control::TurnRight), // right arrow, D
            38 | 87 => Some(Control::Thrust),   // up arrow, W
            88 | 190 => Some(Control::Fire),    // X, .>
            _ => None,
        }
    }
}

/// Snapshot of every control, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl Controls {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::TurnLeft => self.turn_left,
            Control::TurnRight => self.turn_right,
            Control::Thrust => self.thrust,
            Control::Fire => self.fire,
        }
    }

    fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::TurnLeft => self.turn_left = pressed,
            Control::TurnRight => self.turn_right = pressed,
            Control::Thrust => self.thrust = pressed,
            Control::Fire => self.fire = pressed,
        }
    }
}

/// Live input state, last write wins per control
#[derive(Debug, Clone, Default)]
pub struct InputState {
    controls: Controls,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_control(&mut self, control: Control, pressed: bool) {
        self.controls.set(control, pressed);
    }

    /// Apply a key event. Returns false for keys that don't map to a control.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.set_control(control, pressed);
                true
            }
            None => false,
        }
    }

    /// Same as `handle_key` for legacy numeric key codes
    pub fn handle_legacy_key(&mut self, key_code: u32, pressed: bool) -> bool {
        match Control::from_legacy_key_code(key_code) {
            Some(control) => {
                self.set_control(control, pressed);
                true
            }
            None => false,
        }
    }

    pub fn read_controls(&self) -> Controls {
        self.controls
    }

    /// Release everything (e.g. when the page loses focus)
    pub fn clear(&mut self) {
        self.controls = Controls::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_keys_map_to_same_control() {
        let pairs = [
            ("ArrowLeft", "KeyA", Control::TurnLeft),
            ("ArrowRight", "KeyD", Control::TurnRight),
            ("ArrowUp", "KeyW", Control::Thrust),
            ("KeyX", "Period", Control::Fire),
        ];
        for (a, b, control) in pairs {
            assert_eq!(Control::from_key_code(a), Some(control));
            assert_eq!(Control::from_key_code(b), Some(control));
        }
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(Control::from_legacy_key_code(37), Some(Control::TurnLeft));
        assert_eq!(Control::from_legacy_key_code(68), Some(Control::TurnRight));
        assert_eq!(Control::from_legacy_key_code(87), Some(Control::Thrust));
        assert_eq!(Control::from_legacy_key_code(190), Some(Control::Fire));
        assert_eq!(Control::from_legacy_key_code(32), None);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut input = InputState::new();
        assert!(!input.handle_key("Space", true));
        assert!(!input.handle_key("KeyQ", true));
        assert_eq!(input.read_controls(), Controls::default());
    }

    #[test]
    fn test_last_write_wins() {
        let mut input = InputState::new();
        assert!(input.handle_key("ArrowUp", true));
        assert!(input.read_controls().thrust);

        // Press on one key, release on its alias: the control is released
        assert!(input.handle_key("KeyW", false));
        assert!(!input.read_controls().thrust);
    }

    #[test]
    fn test_press_and_release_between_reads_is_lost() {
        let mut input = InputState::new();
        input.handle_key("KeyX", true);
        input.handle_key("KeyX", false);
        assert!(!input.read_controls().fire);
    }

    #[test]
    fn test_opposite_turns_both_held() {
        let mut input = InputState::new();
        input.handle_key("ArrowLeft", true);
        input.handle_key("ArrowRight", true);
        let c = input.read_controls();
        assert!(c.turn_left && c.turn_right);
        assert!(c.get(Control::TurnLeft) && c.get(Control::TurnRight));
    }

    #[test]
    fn test_clear_releases_all() {
        let mut input = InputState::new();
        input.set_control(Control::Fire, true);
        input.set_control(Control::Thrust, true);
        input.clear();
        assert_eq!(input.read_controls(), Controls::default());
    }
}
