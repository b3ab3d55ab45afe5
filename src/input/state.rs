use glam::Vec2;
use rustc_hash::FxHashSet;

use crate::input::event::{InputEvent, Key};

/// Per-frame input sample tracker.
///
/// Accumulates mouse and scroll deltas between frames and tracks which
/// movement keys are held. The first cursor sample after start or a
/// focus change only seeds the baseline position and produces no delta;
/// otherwise the camera would snap on the first motion.
pub struct InputState {
    held: FxHashSet<Key>,
    last_cursor: Option<Vec2>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            held: FxHashSet::default(),
            last_cursor: None,
            mouse_delta: Vec2::ZERO,
            scroll_delta: 0.0,
        }
    }

    /// Fold one event into the tracked state.
    ///
    /// The vertical mouse delta is inverted here: screen Y grows
    /// downward while pitch increases looking up.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                if let Some(last) = self.last_cursor {
                    self.mouse_delta += Vec2::new(current.x - last.x, last.y - current.y);
                }
                self.last_cursor = Some(current);
            }
            InputEvent::Scroll { delta } => {
                self.scroll_delta += delta;
            }
            InputEvent::Key { key, pressed } => {
                let _ = self.press_edge(key, pressed);
            }
            InputEvent::FocusChanged { focused } => {
                self.reset_cursor();
                if !focused {
                    // Key-release events are lost while unfocused.
                    self.held.clear();
                }
            }
        }
    }

    /// Track a key transition and report whether it is a fresh press
    /// edge. OS key repeats deliver extra pressed samples while the
    /// key is already down; those are not edges, so toggles bound to
    /// the edge fire exactly once per physical press.
    pub fn press_edge(&mut self, key: Key, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            let _ = self.held.remove(&key);
            false
        }
    }

    /// Whether the given key is currently held.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drain the mouse delta accumulated since the last call.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Drain the scroll delta accumulated since the last call.
    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }

    /// Forget the cursor baseline; the next sample seeds it afresh.
    /// Called when the cursor is re-captured (overlay toggled off).
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_sample_produces_no_delta() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn subsequent_samples_accumulate_inverted_y() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        input.handle_event(InputEvent::CursorMoved { x: 410.0, y: 280.0 });
        input.handle_event(InputEvent::CursorMoved { x: 415.0, y: 290.0 });
        // x: +10 +5; y: screen moved up 20 then down 10 -> pitch +20 -10
        assert_eq!(input.take_mouse_delta(), Vec2::new(15.0, 10.0));
        // Drained.
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn focus_change_resets_the_baseline() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        input.handle_event(InputEvent::FocusChanged { focused: true });
        // Next sample is a new baseline, not a jump from (0, 0).
        input.handle_event(InputEvent::CursorMoved { x: 800.0, y: 600.0 });
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Key {
            key: Key::Forward,
            pressed: true,
        });
        assert!(input.is_held(Key::Forward));
        input.handle_event(InputEvent::FocusChanged { focused: false });
        assert!(!input.is_held(Key::Forward));
    }

    #[test]
    fn key_press_and_release_track_held_state() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Key {
            key: Key::Left,
            pressed: true,
        });
        input.handle_event(InputEvent::Key {
            key: Key::Right,
            pressed: true,
        });
        input.handle_event(InputEvent::Key {
            key: Key::Left,
            pressed: false,
        });
        assert!(!input.is_held(Key::Left));
        assert!(input.is_held(Key::Right));
    }

    #[test]
    fn repeated_press_is_not_an_edge() {
        let mut input = InputState::new();
        assert!(input.press_edge(Key::ToggleBlinn, true));
        // Key repeat while held.
        assert!(!input.press_edge(Key::ToggleBlinn, true));
        assert!(!input.press_edge(Key::ToggleBlinn, false));
        // A new physical press is an edge again.
        assert!(input.press_edge(Key::ToggleBlinn, true));
    }

    #[test]
    fn scroll_accumulates_until_drained() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Scroll { delta: 1.0 });
        input.handle_event(InputEvent::Scroll { delta: -0.5 });
        assert_eq!(input.take_scroll_delta(), 0.5);
        assert_eq!(input.take_scroll_delta(), 0.0);
    }
}
