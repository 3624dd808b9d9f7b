//! Typed text annotations.

use super::{ElementId, HexColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text annotations are created at this multiple of the size slider.
pub const TEXT_SIZE_FACTOR: f64 = 3.5;

/// A line of text anchored at a world position (left edge, baseline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: HexColor,
    /// Font size in world units.
    pub size: f64,
}

impl TextAnnotation {
    /// Create an annotation from user input.
    ///
    /// The text is trimmed; returns `None` when nothing is left.
    pub fn new(anchor: Point, text: &str, color: HexColor, size: f64) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            x: anchor.x,
            y: anchor.y,
            text: text.to_string(),
            color,
            size,
        })
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
