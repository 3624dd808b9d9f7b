//! Rectangle and ellipse outlines dragged out between two corners.

use super::{ElementId, HexColor};
use kurbo::{Ellipse, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outline kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
}

/// A stroked (never filled) shape defined by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ElementId,
    pub tool: ShapeKind,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: HexColor,
    /// Outline width in world units.
    pub size: f64,
    pub opacity: f64,
}

impl Shape {
    /// Start a shape with both corners at `corner`.
    pub fn begin(tool: ShapeKind, corner: Point, color: HexColor, size: f64, opacity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            x1: corner.x,
            y1: corner.y,
            x2: corner.x,
            y2: corner.y,
            color,
            size,
            opacity,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Move the dragged corner.
    pub fn set_second_corner(&mut self, corner: Point) {
        self.x2 = corner.x;
        self.y2 = corner.y;
    }

    /// Normalised bounding box of the two corners.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    /// Ellipse inscribed in the bounding box.
    pub fn ellipse(&self) -> Ellipse {
        Ellipse::from_rect(self.bounds())
    }
}
