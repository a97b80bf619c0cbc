//! Keyboard and scroll input, queued between frames.
//!
//! Scene transitions are edge-triggered: every key-down event (including
//! OS auto-repeat) is one transition, applied in arrival order. Events are
//! queued here by the window event handler and drained once per frame, so a
//! burst of presses inside a single frame is never collapsed into one.
//!
//! Held keys are tracked only to tell a fresh press from a duplicate key-down.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    H,
    Q,
    E,
    W,
    S,
    O,
    P,
    A,
    D,
    R,
    I,
    K,
    M,
    N,
    L,
    Up,
    Down,
    Left,
    Right,
    Space,
    PageUp,
    PageDown,
    Escape,
}

pub struct InputState {
    held: HashSet<Key>,
    pressed: Vec<Key>,
    scroll_delta_y: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: Vec::new(),
            scroll_delta_y: 0.0,
        }
    }

    /// Record a key-down. `repeat` marks OS auto-repeat; it still counts as
    /// a press.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        let fresh = self.held.insert(key);
        if fresh || repeat {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Accumulate a wheel delta in browser pixel units (positive = scroll down).
    pub fn scroll(&mut self, delta_y: f64) {
        self.scroll_delta_y += delta_y;
    }

    /// Take all presses queued since the last call, oldest first.
    pub fn drain_presses(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.pressed)
    }

    pub fn take_scroll(&mut self) -> f64 {
        std::mem::take(&mut self.scroll_delta_y)
    }

    /// Forget held keys, e.g. when the window loses focus and key-up events
    /// will not arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_queues_press() {
        let mut input = InputState::new();
        input.key_down(Key::A, false);
        assert_eq!(input.drain_presses(), vec![Key::A]);
    }

    #[test]
    fn duplicate_down_without_repeat_is_ignored() {
        let mut input = InputState::new();
        input.key_down(Key::A, false);
        input.key_down(Key::A, false);
        assert_eq!(input.drain_presses(), vec![Key::A]);
    }

    #[test]
    fn auto_repeat_counts_as_press() {
        let mut input = InputState::new();
        input.key_down(Key::D, false);
        input.key_down(Key::D, true);
        input.key_down(Key::D, true);
        assert_eq!(input.drain_presses(), vec![Key::D, Key::D, Key::D]);
    }

    #[test]
    fn drain_preserves_order_and_empties_queue() {
        let mut input = InputState::new();
        input.key_down(Key::L, false);
        input.key_down(Key::Space, false);
        input.key_up(Key::L);
        input.key_down(Key::L, false);

        assert_eq!(input.drain_presses(), vec![Key::L, Key::Space, Key::L]);
        assert!(input.drain_presses().is_empty());
        // Held state survives the drain: still-held keys are not re-queued.
        input.key_down(Key::Space, false);
        input.key_down(Key::L, false);
        assert!(input.drain_presses().is_empty());
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::A);
        assert!(input.drain_presses().is_empty());
        input.key_down(Key::A, false);
        assert_eq!(input.drain_presses(), vec![Key::A]);
    }

    #[test]
    fn scroll_accumulates_until_taken() {
        let mut input = InputState::new();
        input.scroll(100.0);
        input.scroll(-40.0);
        assert!((input.take_scroll() - 60.0).abs() < f64::EPSILON);
        assert!(input.take_scroll().abs() < f64::EPSILON);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::W, false);
        input.key_down(Key::S, false);
        input.release_all();
        // A fresh press after release is queued again.
        input.key_down(Key::W, false);
        input.key_down(Key::S, false);
        assert_eq!(
            input.drain_presses(),
            vec![Key::W, Key::S, Key::W, Key::S]
        );
    }
}
