//! Element records stored in a board scene.

mod outline;
mod stroke;
mod text;

pub use outline::{Shape, ShapeKind};
pub use stroke::{
    DEFAULT_PRESSURE, ERASER_WIDTH_FACTOR, HIGHLIGHT_SIZE_FACTOR, SMOOTHING_MIN_POINTS, Stroke,
    StrokePoint, StrokeTool,
};
pub use text::{TEXT_SIZE_FACTOR, TextAnnotation};

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a committed or live element.
pub type ElementId = Uuid;

/// Error returned when a color string is not a valid `#rgb` / `#rrggbb` hex value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// An opaque RGB color that serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        let err = || ColorParseError(hex.to_string());

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());

        match digits.len() {
            6 if digits.is_ascii() => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 if digits.is_ascii() => {
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to an opaque peniko color.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_hex()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        color.to_color()
    }
}

/// The in-progress element of the current gesture, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub enum LiveElement<'a> {
    Stroke(&'a Stroke),
    Shape(&'a Shape),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let color = HexColor::from_hex("#00ffb3").unwrap();
        assert_eq!(color, HexColor::new(0x00, 0xff, 0xb3));
        assert_eq!(color.to_hex(), "#00ffb3");
    }

    #[test]
    fn test_parse_short_hex() {
        let color: HexColor = "#f0a".parse().unwrap();
        assert_eq!(color, HexColor::new(0xff, 0x00, 0xaa));
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(HexColor::from_hex("FFFFFF").unwrap(), HexColor::white());
    }

    #[test]
    fn test_reject_invalid_hex() {
        assert!(HexColor::from_hex("#12345").is_err());
        assert!(HexColor::from_hex("#gggggg").is_err());
        assert!(HexColor::from_hex("").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::new(255, 68, 102)).unwrap();
        assert_eq!(json, "\"#ff4466\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HexColor::new(255, 68, 102));
        assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
    }
}
