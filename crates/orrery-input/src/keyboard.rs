//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] accumulates winit key events during a frame and answers,
//! for any physical key: is it held, was it pressed this frame, was it
//! released this frame, and did the OS auto-repeat it this frame.
//!
//! Physical key codes are used so bindings sit in the same place on every
//! layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    /// OS auto-repeat while the key is held.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat press of `code`.
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A release of `code`.
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Tracks per-frame keyboard state using physical (scan-code) keys.
///
/// Forward every [`KeyEvent`] to [`process_event`](Self::process_event), query
/// during the frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
    repeated: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    ///
    /// Repeats only mark the key as repeated; they never count as a fresh press.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        match (event.state, event.repeat) {
            (ElementState::Pressed, true) => {
                if self.pressed.contains(&event.key) {
                    self.repeated.insert(event.key);
                }
            }
            (ElementState::Pressed, false) => {
                self.pressed.insert(event.key);
                self.just_pressed.insert(event.key);
            }
            (ElementState::Released, _) => {
                self.pressed.remove(&event.key);
                self.just_released.insert(event.key);
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    #[must_use]
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.just_released.contains(&key)
    }

    /// Pressed this frame, or auto-repeated this frame while held.
    #[must_use]
    pub fn pressed_or_repeated(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key) || self.repeated.contains(&key)
    }

    /// Either shift key is held.
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.is_pressed(PhysicalKey::Code(KeyCode::ShiftLeft))
            || self.is_pressed(PhysicalKey::Code(KeyCode::ShiftRight))
    }

    /// Drop all held keys, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
    }

    /// Clears the per-frame sets. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.repeated.clear();
    }
}
