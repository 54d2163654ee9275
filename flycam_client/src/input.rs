//! Input handling.
//!
//! A windowing layer samples the keyboard once per frame and turns the held
//! keys into [`CameraActions`] through [`KeyBindings`]. Headless runs feed
//! the same path from a script string, one comma-separated entry per frame.

use std::collections::HashMap;

use tracing::trace;

bitflags::bitflags! {
    /// Actions held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CameraActions: u32 {
        const NONE = 0;
        const YAW_LEFT = 1 << 0;
        const YAW_RIGHT = 1 << 1;
        const PITCH_DOWN = 1 << 2;
        const PITCH_UP = 1 << 3;
        const ROLL_LEFT = 1 << 4;
        const ROLL_RIGHT = 1 << 5;
        const MOVE_LEFT = 1 << 6;
        const MOVE_RIGHT = 1 << 7;
        const MOVE_FORWARD = 1 << 8;
        const MOVE_BACK = 1 << 9;
        const MOVE_UP = 1 << 10;
        const MOVE_DOWN = 1 << 11;
        const QUIT = 1 << 12;

        const ROTATION = Self::YAW_LEFT.bits() | Self::YAW_RIGHT.bits()
            | Self::PITCH_DOWN.bits() | Self::PITCH_UP.bits()
            | Self::ROLL_LEFT.bits() | Self::ROLL_RIGHT.bits();
        const MOVEMENT = Self::MOVE_LEFT.bits() | Self::MOVE_RIGHT.bits()
            | Self::MOVE_FORWARD.bits() | Self::MOVE_BACK.bits()
            | Self::MOVE_UP.bits() | Self::MOVE_DOWN.bits();
    }
}

impl Default for CameraActions {
    fn default() -> Self {
        Self::NONE
    }
}

/// Script token for the escape key.
pub const ESCAPE: &str = "esc";

/// Key to action map.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<char, CameraActions>,
}

impl Default for KeyBindings {
    /// h/l yaw, k/j pitch, u/o roll, w/a/s/d/q/e move.
    fn default() -> Self {
        let keys = [
            ('h', CameraActions::YAW_LEFT),
            ('l', CameraActions::YAW_RIGHT),
            ('k', CameraActions::PITCH_DOWN),
            ('j', CameraActions::PITCH_UP),
            ('u', CameraActions::ROLL_LEFT),
            ('o', CameraActions::ROLL_RIGHT),
            ('a', CameraActions::MOVE_LEFT),
            ('d', CameraActions::MOVE_RIGHT),
            ('w', CameraActions::MOVE_FORWARD),
            ('s', CameraActions::MOVE_BACK),
            ('e', CameraActions::MOVE_UP),
            ('q', CameraActions::MOVE_DOWN),
        ]
        .into_iter()
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: char, action: CameraActions) {
        self.keys.insert(key.to_ascii_lowercase(), action);
    }

    pub fn action(&self, key: char) -> Option<CameraActions> {
        self.keys.get(&key.to_ascii_lowercase()).copied()
    }

    /// Actions for one frame of held keys, e.g. `"wh"` or `"esc"`.
    ///
    /// Unbound keys are ignored.
    pub fn actions_for(&self, held: &str) -> CameraActions {
        let held = held.trim();
        if held.eq_ignore_ascii_case(ESCAPE) {
            return CameraActions::QUIT;
        }
        let mut actions = CameraActions::NONE;
        for key in held.chars().filter(|c| !c.is_whitespace()) {
            match self.action(key) {
                Some(a) => actions |= a,
                None => trace!(%key, "Unbound key"),
            }
        }
        actions
    }

    /// Splits a comma-separated script into per-frame actions. Empty entries
    /// are idle frames.
    pub fn parse_script(&self, script: &str) -> Vec<CameraActions> {
        script.split(',').map(|frame| self.actions_for(frame)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let b = KeyBindings::default();
        assert_eq!(b.action('h'), Some(CameraActions::YAW_LEFT));
        assert_eq!(b.action('J'), Some(CameraActions::PITCH_UP));
        assert_eq!(b.action('x'), None);
    }

    #[test]
    fn frame_combines_held_keys() {
        let b = KeyBindings::default();
        let a = b.actions_for("wdh");
        assert!(a.contains(CameraActions::MOVE_FORWARD | CameraActions::MOVE_RIGHT));
        assert!(a.contains(CameraActions::YAW_LEFT));
        assert!(a.intersects(CameraActions::ROTATION));
        assert!(!a.contains(CameraActions::QUIT));
        assert_eq!(b.actions_for("zz"), CameraActions::NONE);
    }

    #[test]
    fn escape_quits() {
        assert_eq!(KeyBindings::default().actions_for(" ESC "), CameraActions::QUIT);
    }

    #[test]
    fn script_has_one_entry_per_frame() {
        let b = KeyBindings::default();
        let frames = b.parse_script("w,w,h,,l");
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], CameraActions::MOVE_FORWARD);
        assert_eq!(frames[3], CameraActions::NONE);
        assert_eq!(frames[4], CameraActions::YAW_RIGHT);
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut b = KeyBindings::default();
        b.bind('W', CameraActions::MOVE_UP);
        assert_eq!(b.actions_for("w"), CameraActions::MOVE_UP);
    }
}
