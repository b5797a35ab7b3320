//! Keyboard and pointer state, fed by window events between frames and
//! read by the update pass.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::vector::Vector2;

/// Pointer-delta decay per frame in touch mode.
pub const DEFAULT_TOUCH_MOMENTUM: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
}

impl Key {
    /// Maps a physical key to the keys the game listens to. Both shift keys map to `Shift`.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pressed: HashSet<Key>,
    pointer: Option<Vector2>,
    axis: Vector2,
    touch: bool,
    momentum: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_MOMENTUM)
    }
}

impl InputState {
    pub fn new(touch_momentum: f32) -> Self {
        Self {
            pressed: HashSet::new(),
            pointer: None,
            axis: Vector2::zero(),
            touch: false,
            momentum: touch_momentum,
        }
    }

    /// Records a key transition. Returns false for repeats that change nothing.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> bool {
        if pressed {
            self.pressed.insert(key)
        } else {
            self.pressed.remove(&key)
        }
    }

    /// Same as [`handle_key`](Self::handle_key) for a raw key code; unknown keys are ignored.
    pub fn handle_key_code(&mut self, code: KeyCode, pressed: bool) -> bool {
        Key::from_key_code(code).is_some_and(|key| self.handle_key(key, pressed))
    }

    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_any_key_down(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn reset_key(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn reset_all_keys(&mut self) {
        self.pressed.clear();
    }

    /// Pointer moved to `position` (window pixels). The delta from the last
    /// known position is added to the axis; the first sample only anchors.
    pub fn pointer_moved(&mut self, position: Vector2) {
        if let Some(last) = self.pointer {
            self.axis += position - last;
        }
        self.pointer = Some(position);
    }

    /// Raw relative motion, e.g. from a captured mouse.
    pub fn pointer_delta(&mut self, delta: Vector2) {
        self.axis += delta;
    }

    /// Touch drag. Switches the axis to momentum decay; the first touch after
    /// mouse motion anchors afresh.
    pub fn touch_moved(&mut self, position: Vector2) {
        self.set_touch_mode(true);
        self.pointer_moved(position);
    }

    /// Lifts the finger: the next touch anchors afresh instead of jumping.
    pub fn touch_ended(&mut self) {
        self.pointer = None;
    }

    /// Switching between mouse and touch drops the last pointer position.
    pub fn set_touch_mode(&mut self, touch: bool) {
        if self.touch != touch {
            self.touch = touch;
            self.pointer = None;
        }
    }

    #[inline]
    pub fn is_touch_mode(&self) -> bool {
        self.touch
    }

    /// Pointer delta accumulated since the last reset.
    #[inline]
    pub fn axis(&self) -> Vector2 {
        self.axis
    }

    /// Consumes the axis once per frame: zeroed, or decayed in touch mode.
    pub fn reset_axis(&mut self) {
        if self.touch {
            self.axis = self.axis * self.momentum;
        } else {
            self.axis = Vector2::zero();
        }
    }

    /// Drops all state on teardown.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.pointer = None;
        self.axis = Vector2::zero();
        self.touch = false;
    }
}
