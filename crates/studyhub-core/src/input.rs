//! Device event shapes delivered to the board.
//!
//! These mirror DOM pointer, wheel and keyboard events so recorded sessions and
//! any windowing backend can feed the controller without further translation.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// `buttons` bit for the primary button / pen contact.
pub const BUTTON_PRIMARY: u16 = 1;
/// `buttons` bit for the auxiliary (middle) button.
pub const BUTTON_AUXILIARY: u16 = 4;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Map a DOM `button` index (0 = left, 1 = middle, 2 = right).
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Payload shared by all pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub client_x: f64,
    pub client_y: f64,
    /// Device pressure; 0 or absent means "not reported".
    #[serde(default)]
    pub pressure: f64,
    /// Bitmask of held buttons / active contact.
    #[serde(default)]
    pub buttons: u16,
    /// The button that changed state, for down/up events.
    #[serde(default)]
    pub button: Option<MouseButton>,
    #[serde(default)]
    pub pointer_id: u32,
}

impl PointerInput {
    /// Primary-button input at a client position.
    pub fn primary(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            pressure: 0.0,
            buttons: BUTTON_PRIMARY,
            button: Some(MouseButton::Left),
            pointer_id: 1,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_buttons(mut self, buttons: u16) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_button(mut self, button: Option<MouseButton>) -> Self {
        self.button = button;
        self
    }

    pub fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }

    /// Reported pressure, or `None` when the device gave none.
    pub fn reported_pressure(&self) -> Option<f64> {
        (self.pressure.is_finite() && self.pressure > 0.0).then_some(self.pressure)
    }

    /// Whether any button or contact is active.
    pub fn is_pressed(&self) -> bool {
        self.buttons != 0
    }
}

/// Pointer event type for unified mouse/pen/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PointerEvent {
    Down(PointerInput),
    Move(PointerInput),
    Up(PointerInput),
    Cancel(PointerInput),
}

/// Wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub client_x: f64,
    pub client_y: f64,
    pub delta_y: f64,
}

impl WheelInput {
    pub fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Keyboard payload: physical `code` (e.g. `"Space"`) and logical `key` (e.g. `"z"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub key: String,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key with no modifiers. `code` is derived for letters, digits and space.
    pub fn new(key: &str) -> Self {
        let code = match key {
            " " => "Space".to_string(),
            k if k.len() == 1 && k.chars().all(|c| c.is_ascii_alphabetic()) => {
                format!("Key{}", k.to_ascii_uppercase())
            }
            k if k.len() == 1 && k.chars().all(|c| c.is_ascii_digit()) => format!("Digit{k}"),
            k => k.to_string(),
        };
        Self {
            code,
            key: key.to_string(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_space(&self) -> bool {
        self.code == "Space"
    }

    /// Lowercase letter of the physical key, ignoring shift and caps lock.
    ///
    /// Falls back to the logical `key` when no `code` was reported.
    pub fn letter(&self) -> Option<char> {
        let name = if self.code.is_empty() {
            self.key.as_str()
        } else {
            self.code.strip_prefix("Key")?
        };
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum KeyEvent {
    Pressed(KeyInput),
    Released(KeyInput),
}

/// Any event the board consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelInput),
    Key(KeyEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_index() {
        assert_eq!(MouseButton::from_index(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_index(1), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_index(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_index(5), None);
    }

    #[test]
    fn test_reported_pressure() {
        let input = PointerInput::primary(0.0, 0.0);
        assert_eq!(input.reported_pressure(), None);
        assert_eq!(input.with_pressure(0.8).reported_pressure(), Some(0.8));
        assert_eq!(input.with_pressure(f64::NAN).reported_pressure(), None);
    }

    #[test]
    fn test_key_letter() {
        assert_eq!(KeyInput::new("Z").letter(), Some('z'));
        let mac = KeyInput {
            code: "KeyZ".to_string(),
            key: "Ω".to_string(),
            modifiers: Modifiers::default(),
        };
        assert_eq!(mac.letter(), Some('z'));
        let bare = KeyInput {
            code: String::new(),
            key: "Y".to_string(),
            modifiers: Modifiers::default(),
        };
        assert_eq!(bare.letter(), Some('y'));
        assert_eq!(KeyInput::new("Enter").letter(), None);
        assert_eq!(KeyInput::new("0").letter(), None);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(KeyInput::new(" ").code, "Space");
        assert_eq!(KeyInput::new("z").code, "KeyZ");
        assert_eq!(KeyInput::new("0").code, "Digit0");
        assert_eq!(KeyInput::new("Enter").code, "Enter");
    }

    #[test]
    fn test_command_modifier() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert!(ctrl.command());
        assert!(meta.command());
        assert!(!Modifiers::default().command());
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"pointer","phase":"down","client_x":10,"client_y":20,"pressure":0.8,"buttons":1,"button":"left","pointer_id":3}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        match event {
            InputEvent::Pointer(PointerEvent::Down(input)) => {
                assert_eq!(input.client(), Point::new(10.0, 20.0));
                assert_eq!(input.pointer_id, 3);
                assert_eq!(input.button, Some(MouseButton::Left));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let json = r#"{"type":"key","phase":"pressed","code":"KeyZ","key":"z","ctrl":true}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        match event {
            InputEvent::Key(KeyEvent::Pressed(key)) => assert!(key.modifiers.command()),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
