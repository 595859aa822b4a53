//! Keyboard input mapping
//!
//! Turns timestamped key-down/key-up edges into the intents the player reads.
//! Double jump has two sources: a quick double press of a jump key, or a held
//! modifier (Shift/Control).
//!
//! Timers are deadlines checked against the caller's clock in `advance`, so a
//! host feeds its own millisecond timestamps and tests can script them.

use std::collections::HashSet;

use crate::sim::IntentSource;

/// Two gesture-key presses closer than this arm the double jump
pub const DOUBLE_PRESS_WINDOW_MS: u64 = 250;
/// Armed double jump clears itself after this long
pub const ARMED_TIMEOUT_MS: u64 = 100;
/// Delay between releasing a gesture key and re-checking the held keys
pub const RELEASE_DEBOUNCE_MS: u64 = 50;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Shift,
    Control,
    /// Single printable character, case preserved
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM-style `KeyboardEvent.key` name
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            " " | "Space" => Key::Space,
            "Shift" => Key::Shift,
            "Control" => Key::Control,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    /// Keys whose double press arms the double jump
    fn is_gesture_key(&self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp)
    }
}

/// Keyboard state plus the double-press gesture detector
#[derive(Debug, Default)]
pub struct InputHandler {
    held: HashSet<Key>,
    last_gesture_press: Option<u64>,
    armed: bool,
    armed_until: u64,
    release_checks: Vec<u64>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_held(*k))
    }

    pub fn key_down(&mut self, key: Key, now_ms: u64) {
        self.advance(now_ms);
        self.held.insert(key);

        if key.is_gesture_key() {
            if let Some(last) = self.last_gesture_press {
                if now_ms.saturating_sub(last) < DOUBLE_PRESS_WINDOW_MS {
                    self.armed = true;
                    self.armed_until = now_ms + ARMED_TIMEOUT_MS;
                }
            }
            self.last_gesture_press = Some(now_ms);
        }
    }

    pub fn key_up(&mut self, key: Key, now_ms: u64) {
        self.advance(now_ms);
        self.held.remove(&key);

        if key.is_gesture_key() {
            self.release_checks.push(now_ms + RELEASE_DEBOUNCE_MS);
        }
    }

    /// Fire every timer due at or before `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        if self.armed && now_ms >= self.armed_until {
            self.armed = false;
        }

        let before = self.release_checks.len();
        self.release_checks.retain(|deadline| *deadline > now_ms);
        if self.release_checks.len() < before && !self.any_held(&[Key::Space, Key::ArrowUp]) {
            self.armed = false;
        }
    }

    /// Forget every held key and pending gesture, e.g. on focus loss
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl IntentSource for InputHandler {
    fn is_left_pressed(&self) -> bool {
        self.any_held(&[Key::ArrowLeft, Key::Char('a'), Key::Char('A')])
    }

    fn is_right_pressed(&self) -> bool {
        self.any_held(&[Key::ArrowRight, Key::Char('d'), Key::Char('D')])
    }

    fn is_jump_pressed(&self) -> bool {
        self.any_held(&[Key::Space, Key::ArrowUp, Key::Char('w'), Key::Char('W')])
    }

    fn is_double_jump_pressed(&self) -> bool {
        self.armed || self.any_held(&[Key::Shift, Key::Control])
    }

    fn reset_double_jump(&mut self) {
        self.armed = false;
    }
}
