//! Committed board content.

use crate::shapes::{Shape, Stroke, TextAnnotation};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything committed to the board, in draw order per category.
///
/// Elements are shared behind `Arc` and never mutated after commit, so cloning a
/// scene for a history snapshot copies pointers rather than point data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    strokes: Vec<Arc<Stroke>>,
    #[serde(default)]
    shapes: Vec<Arc<Shape>>,
    #[serde(default)]
    texts: Vec<Arc<TextAnnotation>>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Arc<Stroke>] {
        &self.strokes
    }

    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    pub fn texts(&self) -> &[Arc<TextAnnotation>] {
        &self.texts
    }

    /// Return a scene with `stroke` appended.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.strokes.push(Arc::new(stroke));
        self
    }

    /// Return a scene with `shape` appended.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(Arc::new(shape));
        self
    }

    /// Return a scene with `text` appended.
    pub fn with_text(mut self, text: TextAnnotation) -> Self {
        self.texts.push(Arc::new(text));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.shapes.is_empty() && self.texts.is_empty()
    }

    /// Total number of elements across all categories.
    pub fn len(&self) -> usize {
        self.strokes.len() + self.shapes.len() + self.texts.len()
    }

    /// Bounding box of strokes and shapes, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes
            .iter()
            .map(|s| s.bounds())
            .chain(self.shapes.iter().map(|s| s.bounds()))
            .reduce(|a, b| a.union(b))
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{HexColor, ShapeKind, StrokePoint, StrokeTool};
    use kurbo::Point;

    fn sample_scene() -> Scene {
        let mut stroke = Stroke::begin(
            StrokeTool::Pen,
            HexColor::white(),
            4.0,
            1.0,
            StrokePoint::new(0.0, 0.0, 0.5),
        );
        stroke.add_point(StrokePoint::new(10.0, 10.0, 0.7));

        let mut shape = Shape::begin(
            ShapeKind::Circle,
            Point::new(20.0, 20.0),
            HexColor::black(),
            2.0,
            0.5,
        );
        shape.set_second_corner(Point::new(60.0, 40.0));

        let text = TextAnnotation::new(Point::new(5.0, 5.0), "note", HexColor::white(), 14.0)
            .unwrap();

        Scene::new().with_stroke(stroke).with_shape(shape).with_text(text)
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 0);
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn test_append_keeps_order() {
        let scene = sample_scene();
        assert_eq!(scene.strokes().len(), 1);
        assert_eq!(scene.shapes().len(), 1);
        assert_eq!(scene.texts().len(), 1);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_clone_shares_elements() {
        let scene = sample_scene();
        let snapshot = scene.clone();
        assert!(Arc::ptr_eq(&scene.strokes()[0], &snapshot.strokes()[0]));
        assert_eq!(scene, snapshot);
    }

    #[test]
    fn test_bounds_union() {
        let bounds = sample_scene().bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 60.0, 40.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let scene = sample_scene();
        let json = scene.to_json().unwrap();
        let loaded = Scene::from_json(&json).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_json_missing_categories_default_empty() {
        let scene = Scene::from_json("{}").unwrap();
        assert!(scene.is_empty());
    }
}
