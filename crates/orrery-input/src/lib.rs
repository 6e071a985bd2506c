//! Input state for the orrery: frame-coherent keyboard and mouse tracking,
//! plus the key bindings that map presses onto control-panel actions.

pub mod bindings;
pub mod keyboard;
pub mod mouse;

pub use bindings::{BindingError, Conflict, ControlAction, KeyBindings, KeyChord, parse_key_code};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::{DragButton, MouseState};
