//! Input tracking for a loop that consumes discrete events in arrival order.
//!
//! - **Event queue:** key presses, mouse button transitions and quit requests
//!   are appended as they arrive from the windowing layer and drained once per
//!   frame tick, in order. A press and its release can land in the same tick
//!   and are both seen.
//!
//! - **Level state:** the cursor position and the set of held keys/buttons are
//!   kept current as events arrive. Held keys suppress OS key repeat so each
//!   physical key press queues one event. Mouse buttons are never filtered.

use std::collections::{HashSet, VecDeque};

use glam::IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseDown(MouseBtn),
    MouseUp(MouseBtn),
}

pub struct InputState {
    held: HashSet<Key>,
    mouse_held: HashSet<MouseBtn>,
    pending: VecDeque<InputEvent>,

    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            mouse_held: HashSet::new(),
            pending: VecDeque::new(),
            mouse_position: (0.0, 0.0),
        }
    }

    pub fn quit(&mut self) {
        self.pending.push_back(InputEvent::Quit);
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pending.push_back(InputEvent::KeyDown(key));
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Every press is queued, even one whose release was never seen.
    pub fn mouse_down(&mut self, btn: MouseBtn) {
        self.mouse_held.insert(btn);
        self.pending.push_back(InputEvent::MouseDown(btn));
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        self.mouse_held.remove(&btn);
        self.pending.push_back(InputEvent::MouseUp(btn));
    }

    /// Forget held keys and buttons, e.g. when the window loses focus and
    /// their releases will go elsewhere.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse_held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse_held.contains(&btn)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Cursor position rounded down to whole logical pixels.
    pub fn mouse_pixel(&self) -> IVec2 {
        IVec2::new(
            self.mouse_position.0.floor() as i32,
            self.mouse_position.1.floor() as i32,
        )
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
