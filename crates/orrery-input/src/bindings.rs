//! Key bindings for the control panel.
//!
//! Each [`ControlAction`] is bound to one or more [`KeyChord`]s. Defaults can
//! be overridden from the config file's `input.keybindings` table, which maps
//! action names (`"pause"`, `"select_slider_3"`, ...) to key names as winit
//! spells them (`"Space"`, `"KeyP"`, `"Shift+Tab"`). Several keys for one
//! action are separated by commas.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::keyboard::KeyboardState;

/// Highest slider reachable with a direct-select digit.
pub const MAX_DIRECT_SLIDERS: u8 = 8;

/// Something the user can ask the control panel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    TogglePause,
    ToggleTheme,
    /// Reset every orbit, slider, and the camera.
    Reset,
    NextSlider,
    PrevSlider,
    /// Raise the selected slider by one step. Auto-repeats while held.
    SpeedUp,
    /// Lower the selected slider by one step. Auto-repeats while held.
    SpeedDown,
    /// Select slider `n` (1-based).
    SelectSlider(u8),
    Quit,
}

impl ControlAction {
    /// Every action, in the order they are resolved each frame.
    pub fn all() -> impl Iterator<Item = ControlAction> {
        [
            Self::TogglePause,
            Self::ToggleTheme,
            Self::Reset,
            Self::NextSlider,
            Self::PrevSlider,
            Self::SpeedUp,
            Self::SpeedDown,
        ]
        .into_iter()
        .chain((1..=MAX_DIRECT_SLIDERS).map(Self::SelectSlider))
        .chain(std::iter::once(Self::Quit))
    }

    /// Name used in the config file.
    pub fn name(self) -> String {
        match self {
            Self::TogglePause => "pause".to_string(),
            Self::ToggleTheme => "theme".to_string(),
            Self::Reset => "reset".to_string(),
            Self::NextSlider => "next_slider".to_string(),
            Self::PrevSlider => "prev_slider".to_string(),
            Self::SpeedUp => "speed_up".to_string(),
            Self::SpeedDown => "speed_down".to_string(),
            Self::SelectSlider(n) => format!("select_slider_{n}"),
            Self::Quit => "quit".to_string(),
        }
    }

    /// Inverse of [`name`](Self::name). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::all().find(|a| a.name() == name)
    }

    fn repeats(self) -> bool {
        matches!(self, Self::SpeedUp | Self::SpeedDown)
    }
}

/// A key, optionally with shift held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub shift: bool,
}

impl KeyChord {
    pub const fn key(code: KeyCode) -> Self {
        Self { code, shift: false }
    }

    pub const fn shifted(code: KeyCode) -> Self {
        Self { code, shift: true }
    }

    /// Parse `"KeyP"` or `"Shift+Tab"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once('+') {
            Some((modifier, key)) if modifier.trim().eq_ignore_ascii_case("shift") => {
                parse_key_code(key.trim()).map(Self::shifted)
            }
            Some(_) => None,
            None => parse_key_code(s).map(Self::key),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "Shift+{:?}", self.code)
        } else {
            write!(f, "{:?}", self.code)
        }
    }
}

/// A rejected keybinding override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("unknown key '{key}' for action '{action}'")]
    UnknownKey { action: String, key: String },
}

/// One chord bound to more than one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub chord: KeyChord,
    pub actions: Vec<ControlAction>,
}

/// Action to chord table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<ControlAction, Vec<KeyChord>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;

        let digits = [Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8];
        let mut bindings = HashMap::from([
            (ControlAction::TogglePause, vec![KeyChord::key(Space)]),
            (ControlAction::ToggleTheme, vec![KeyChord::key(KeyT)]),
            (ControlAction::Reset, vec![KeyChord::key(KeyR)]),
            (ControlAction::NextSlider, vec![KeyChord::key(Tab)]),
            (ControlAction::PrevSlider, vec![KeyChord::shifted(Tab)]),
            (
                ControlAction::SpeedUp,
                vec![KeyChord::key(ArrowUp), KeyChord::key(Equal), KeyChord::key(NumpadAdd)],
            ),
            (
                ControlAction::SpeedDown,
                vec![
                    KeyChord::key(ArrowDown),
                    KeyChord::key(Minus),
                    KeyChord::key(NumpadSubtract),
                ],
            ),
            (ControlAction::Quit, vec![KeyChord::key(Escape)]),
        ]);
        for (n, code) in (1..=MAX_DIRECT_SLIDERS).zip(digits) {
            bindings.insert(ControlAction::SelectSlider(n), vec![KeyChord::key(code)]);
        }
        Self { bindings }
    }
}

impl KeyBindings {
    /// Defaults with `overrides` applied. Invalid entries are skipped and
    /// returned so the caller can report them.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> (Self, Vec<BindingError>) {
        let mut bindings = Self::default();
        let errors = bindings.apply_overrides(overrides);
        (bindings, errors)
    }

    /// Replace the chords of every action named in `overrides`.
    ///
    /// An entry is applied only if its action and all of its keys parse.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<BindingError> {
        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();

        let mut errors = Vec::new();
        for name in names {
            let Some(action) = ControlAction::from_name(name) else {
                errors.push(BindingError::UnknownAction(name.clone()));
                continue;
            };
            let keys = &overrides[name];
            let parsed: Result<Vec<KeyChord>, BindingError> = keys
                .split(',')
                .filter(|k| !k.trim().is_empty())
                .map(|k| {
                    KeyChord::parse(k).ok_or_else(|| BindingError::UnknownKey {
                        action: name.clone(),
                        key: k.trim().to_string(),
                    })
                })
                .collect();
            match parsed {
                Ok(chords) => {
                    debug!(action = %name, keys = %keys, "Keybinding override");
                    self.bindings.insert(action, chords);
                }
                Err(e) => errors.push(e),
            }
        }
        errors
    }

    /// Chords bound to `action`.
    pub fn chords(&self, action: ControlAction) -> &[KeyChord] {
        self.bindings
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Chords bound to more than one action.
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<KeyChord, Vec<ControlAction>> = HashMap::new();
        for action in ControlAction::all() {
            for chord in self.chords(action) {
                seen.entry(*chord).or_default().push(action);
            }
        }
        let mut conflicts: Vec<Conflict> = seen
            .into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(chord, actions)| Conflict { chord, actions })
            .collect();
        conflicts.sort_by_key(|c| c.chord.to_string());
        conflicts
    }

    /// Actions triggered this frame, each at most once, in
    /// [`ControlAction::all`] order.
    pub fn resolve(&self, keyboard: &KeyboardState) -> Vec<ControlAction> {
        ControlAction::all()
            .filter(|&action| {
                self.chords(action).iter().any(|chord| {
                    let key = PhysicalKey::Code(chord.code);
                    let hit = if action.repeats() {
                        keyboard.pressed_or_repeated(key)
                    } else {
                        keyboard.just_pressed(key)
                    };
                    hit && self.shift_matches(*chord, keyboard)
                })
            })
            .collect()
    }

    /// A plain chord ignores shift unless the same key is also bound with
    /// shift, so `Shift+Equal` still steps a slider up.
    fn shift_matches(&self, chord: KeyChord, keyboard: &KeyboardState) -> bool {
        let shift = keyboard.shift_held();
        if chord.shift {
            return shift;
        }
        !shift
            || !self
                .bindings
                .values()
                .flatten()
                .any(|c| c.shift && c.code == chord.code)
    }
}

/// Parse a winit [`KeyCode`] from its debug name (`"KeyW"`, `"ArrowUp"`).
pub fn parse_key_code(s: &str) -> Option<KeyCode> {
    use KeyCode::*;

    Some(match s {
        "KeyA" => KeyA,
        "KeyB" => KeyB,
        "KeyC" => KeyC,
        "KeyD" => KeyD,
        "KeyE" => KeyE,
        "KeyF" => KeyF,
        "KeyG" => KeyG,
        "KeyH" => KeyH,
        "KeyI" => KeyI,
        "KeyJ" => KeyJ,
        "KeyK" => KeyK,
        "KeyL" => KeyL,
        "KeyM" => KeyM,
        "KeyN" => KeyN,
        "KeyO" => KeyO,
        "KeyP" => KeyP,
        "KeyQ" => KeyQ,
        "KeyR" => KeyR,
        "KeyS" => KeyS,
        "KeyT" => KeyT,
        "KeyU" => KeyU,
        "KeyV" => KeyV,
        "KeyW" => KeyW,
        "KeyX" => KeyX,
        "KeyY" => KeyY,
        "KeyZ" => KeyZ,
        "Digit0" => Digit0,
        "Digit1" => Digit1,
        "Digit2" => Digit2,
        "Digit3" => Digit3,
        "Digit4" => Digit4,
        "Digit5" => Digit5,
        "Digit6" => Digit6,
        "Digit7" => Digit7,
        "Digit8" => Digit8,
        "Digit9" => Digit9,
        "Numpad1" => Numpad1,
        "Numpad2" => Numpad2,
        "Numpad3" => Numpad3,
        "Numpad4" => Numpad4,
        "Numpad5" => Numpad5,
        "Numpad6" => Numpad6,
        "Numpad7" => Numpad7,
        "Numpad8" => Numpad8,
        "NumpadAdd" => NumpadAdd,
        "NumpadSubtract" => NumpadSubtract,
        "Space" => Space,
        "Enter" => Enter,
        "Escape" => Escape,
        "Tab" => Tab,
        "Backspace" => Backspace,
        "Minus" => Minus,
        "Equal" => Equal,
        "BracketLeft" => BracketLeft,
        "BracketRight" => BracketRight,
        "Comma" => Comma,
        "Period" => Period,
        "Slash" => Slash,
        "ArrowUp" => ArrowUp,
        "ArrowDown" => ArrowDown,
        "ArrowLeft" => ArrowLeft,
        "ArrowRight" => ArrowRight,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        "F1" => F1,
        "F2" => F2,
        "F3" => F3,
        "F4" => F4,
        "F5" => F5,
        "F6" => F6,
        "F7" => F7,
        "F8" => F8,
        "F9" => F9,
        "F10" => F10,
        "F11" => F11,
        "F12" => F12,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;

    fn frame(keys: &[KeyCode]) -> KeyboardState {
        let mut kb = KeyboardState::new();
        for &k in keys {
            kb.process_raw(RawKeyEvent::press(k));
        }
        kb
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::Space])),
            vec![ControlAction::TogglePause]
        );
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::KeyT])),
            vec![ControlAction::ToggleTheme]
        );
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::Digit3])),
            vec![ControlAction::SelectSlider(3)]
        );
        assert!(bindings.detect_conflicts().is_empty());
    }

    #[test]
    fn test_shift_tab_selects_previous() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::Tab])),
            vec![ControlAction::NextSlider]
        );
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::ShiftLeft, KeyCode::Tab])),
            vec![ControlAction::PrevSlider]
        );
    }

    #[test]
    fn test_shift_equal_still_steps_up() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::ShiftRight, KeyCode::Equal])),
            vec![ControlAction::SpeedUp]
        );
    }

    #[test]
    fn test_speed_keys_repeat_but_toggles_do_not() {
        let bindings = KeyBindings::default();
        let mut kb = frame(&[KeyCode::ArrowUp, KeyCode::Space]);
        kb.clear_transients();
        for code in [KeyCode::ArrowUp, KeyCode::Space] {
            kb.process_raw(RawKeyEvent {
                repeat: true,
                ..RawKeyEvent::press(code)
            });
        }
        assert_eq!(bindings.resolve(&kb), vec![ControlAction::SpeedUp]);
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in ControlAction::all() {
            assert_eq!(ControlAction::from_name(&action.name()), Some(action));
        }
        assert_eq!(ControlAction::from_name(" PAUSE "), Some(ControlAction::TogglePause));
        assert_eq!(ControlAction::from_name("select_slider_9"), None);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let overrides = HashMap::from([
            ("pause".to_string(), "KeyP, Enter".to_string()),
            ("prev_slider".to_string(), "Shift+KeyQ".to_string()),
        ]);
        let (bindings, errors) = KeyBindings::from_overrides(&overrides);
        assert!(errors.is_empty());
        assert_eq!(
            bindings.chords(ControlAction::TogglePause),
            &[KeyChord::key(KeyCode::KeyP), KeyChord::key(KeyCode::Enter)]
        );
        assert!(bindings.resolve(&frame(&[KeyCode::Space])).is_empty());
        assert_eq!(
            bindings.resolve(&frame(&[KeyCode::ShiftLeft, KeyCode::KeyQ])),
            vec![ControlAction::PrevSlider]
        );
    }

    #[test]
    fn test_invalid_overrides_reported_and_skipped() {
        let overrides = HashMap::from([
            ("warp_drive".to_string(), "KeyW".to_string()),
            ("reset".to_string(), "KeyX, NotAKey".to_string()),
        ]);
        let (bindings, errors) = KeyBindings::from_overrides(&overrides);
        assert_eq!(
            errors,
            vec![
                BindingError::UnknownKey {
                    action: "reset".to_string(),
                    key: "NotAKey".to_string(),
                },
                BindingError::UnknownAction("warp_drive".to_string()),
            ]
        );
        assert_eq!(
            bindings.chords(ControlAction::Reset),
            &[KeyChord::key(KeyCode::KeyR)]
        );
    }

    #[test]
    fn test_conflict_detection() {
        let overrides = HashMap::from([("theme".to_string(), "Space".to_string())]);
        let (bindings, _) = KeyBindings::from_overrides(&overrides);
        let conflicts = bindings.detect_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].chord, KeyChord::key(KeyCode::Space));
        assert_eq!(
            conflicts[0].actions,
            vec![ControlAction::TogglePause, ControlAction::ToggleTheme]
        );
    }

    #[test]
    fn test_chord_parse_and_display() {
        assert_eq!(
            KeyChord::parse("shift + Tab"),
            Some(KeyChord::shifted(KeyCode::Tab))
        );
        assert_eq!(KeyChord::parse("Ctrl+Tab"), None);
        assert_eq!(KeyChord::shifted(KeyCode::Tab).to_string(), "Shift+Tab");
        assert_eq!(parse_key_code("F13"), None);
    }
}
