//! Frame-coherent mouse state tracker.
//!
//! [`MouseState`] accumulates winit mouse events during a frame: cursor
//! position in physical pixels, per-button drag deltas for the orbit
//! controls, wheel motion, and whether the cursor is over the window.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Buttons that drive camera drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    /// Orbit.
    Primary,
    /// Pan.
    Secondary,
}

impl DragButton {
    fn from_winit(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Primary),
            MouseButton::Right | MouseButton::Middle => Some(Self::Secondary),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    just_pressed: bool,
    drag: Vec2,
}

/// Frame-coherent mouse state.
///
/// Feed winit events through the `on_*` methods, read during the frame, then
/// call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    buttons: [ButtonFrame; 2],
    scroll: f32,
    cursor_in_window: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `CursorMoved`, in physical pixels.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        // The first event after entering only establishes the position.
        if let Some(old) = self.position {
            let step = new_pos - old;
            self.delta += step;
            for b in self.buttons.iter_mut().filter(|b| b.held) {
                b.drag += step;
            }
        }
        self.position = Some(new_pos);
        self.cursor_in_window = true;
    }

    /// `MouseInput`. Buttons other than left, right, and middle are ignored.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(drag) = DragButton::from_winit(button) else {
            return;
        };
        let frame = &mut self.buttons[drag.index()];
        match state {
            ElementState::Pressed => {
                frame.held = true;
                frame.just_pressed = true;
            }
            ElementState::Released => frame.held = false,
        }
    }

    /// `MouseWheel`. Positive is away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => self.scroll += y,
            MouseScrollDelta::PixelDelta(pos) => self.scroll += (pos.y / PIXELS_PER_LINE) as f32,
        }
    }

    pub fn on_cursor_entered(&mut self) {
        self.cursor_in_window = true;
    }

    /// `CursorLeft`. Drags end because release events may never arrive.
    pub fn on_cursor_left(&mut self) {
        self.cursor_in_window = false;
        self.position = None;
        for b in &mut self.buttons {
            b.held = false;
        }
    }

    /// Clears per-frame motion, wheel, and press edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.drag = Vec2::ZERO;
        }
    }

    /// Cursor position in physical pixels, if the cursor is over the window.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position.filter(|_| self.cursor_in_window)
    }

    /// Total cursor motion this frame.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Cursor motion this frame while `button` was held.
    #[must_use]
    pub fn drag_delta(&self, button: DragButton) -> Vec2 {
        self.buttons[button.index()].drag
    }

    #[must_use]
    pub fn is_held(&self, button: DragButton) -> bool {
        self.buttons[button.index()].held
    }

    #[must_use]
    pub fn just_pressed(&self, button: DragButton) -> bool {
        self.buttons[button.index()].just_pressed
    }

    /// Wheel lines accumulated this frame.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_cursor_in_window(&self) -> bool {
        self.cursor_in_window
    }
}
