//! Keyboard state and per-tick input
//!
//! The host forwards raw `keydown`/`keyup` key names; the session turns the
//! held-key map plus any queued presses into one [`TickInput`] per tick.

use std::collections::HashMap;

use super::state::Direction;
use crate::consts::keys;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Space pressed since the previous tick (jump/shoot)
    pub action: bool,
    /// Latest direction key pressed since the previous tick
    pub turn: Option<Direction>,
}

/// Held keys plus one-shot presses waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
    action_queued: bool,
    turn_queued: Option<Direction>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound to the game
    /// (the host suppresses the browser default for those).
    pub fn key_down(&mut self, key: &str) -> bool {
        let key = key.to_lowercase();
        let was_held = self.is_held(&key);
        self.held.insert(key.clone(), true);

        if key == keys::ACTION {
            // Auto-repeat keydowns arrive while held; only the first counts
            if !was_held {
                self.action_queued = true;
            }
            return true;
        }
        match direction_for(&key) {
            Some(dir) => {
                self.turn_queued = Some(dir);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.insert(key.to_lowercase(), false);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    fn any_held(&self, names: &[&str]) -> bool {
        names.iter().any(|k| self.is_held(k))
    }

    /// Build this tick's input and consume the one-shot presses
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.any_held(&keys::LEFT),
            right: self.any_held(&keys::RIGHT),
            up: self.any_held(&keys::UP),
            down: self.any_held(&keys::DOWN),
            action: std::mem::take(&mut self.action_queued),
            turn: self.turn_queued.take(),
        }
    }

    /// Drop everything (window blur loses keyups)
    pub fn clear(&mut self) {
        self.held.clear();
        self.action_queued = false;
        self.turn_queued = None;
    }
}

fn direction_for(key: &str) -> Option<Direction> {
    if keys::LEFT.contains(&key) {
        Some(Direction::Left)
    } else if keys::RIGHT.contains(&key) {
        Some(Direction::Right)
    } else if keys::UP.contains(&key) {
        Some(Direction::Up)
    } else if keys::DOWN.contains(&key) {
        Some(Direction::Down)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_until_released() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowLeft");
        assert!(keys.take_tick_input().left);
        assert!(keys.take_tick_input().left);
        keys.key_up("ArrowLeft");
        assert!(!keys.take_tick_input().left);
    }

    #[test]
    fn test_action_fires_once_per_press() {
        let mut keys = KeyState::new();
        keys.key_down(" ");
        keys.key_down(" "); // auto-repeat
        assert!(keys.take_tick_input().action);
        assert!(!keys.take_tick_input().action);

        keys.key_up(" ");
        keys.key_down(" ");
        assert!(keys.take_tick_input().action);
    }

    #[test]
    fn test_turn_request_is_latest_press() {
        let mut keys = KeyState::new();
        keys.key_down("w");
        keys.key_down("d");
        let input = keys.take_tick_input();
        assert_eq!(input.turn, Some(Direction::Right));
        assert_eq!(keys.take_tick_input().turn, None);
    }

    #[test]
    fn test_unbound_keys_report_false() {
        let mut keys = KeyState::new();
        assert!(!keys.key_down("Shift"));
        assert!(keys.key_down("S"));
    }
}
