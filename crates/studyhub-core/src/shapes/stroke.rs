//! Freehand strokes: pen, highlighter and eraser ink.

use super::{ElementId, HexColor};
use crate::geometry::{clamp, smooth};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pressure used when the input device reports none.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Highlighter strokes are created this many times wider than the size slider.
pub const HIGHLIGHT_SIZE_FACTOR: f64 = 6.0;

/// Eraser strokes cut out a band this many times wider than their size.
pub const ERASER_WIDTH_FACTOR: f64 = 2.5;

/// Pen strokes with more points than this get a smoothed path on commit.
pub const SMOOTHING_MIN_POINTS: usize = 3;

/// Tools that produce freehand strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    Pen,
    Highlight,
    Eraser,
}

/// A sampled input position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Normalised pen pressure in `[0, 1]`.
    pub pressure: f64,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// Build from a world point and an optional device pressure.
    ///
    /// Missing or zero pressure (mouse input) falls back to [`DEFAULT_PRESSURE`].
    pub fn from_world(point: Point, pressure: Option<f64>) -> Self {
        let pressure = match pressure {
            Some(p) if p.is_finite() && p > 0.0 => p.min(1.0),
            _ => DEFAULT_PRESSURE,
        };
        Self::new(point.x, point.y, pressure)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    pub tool: StrokeTool,
    pub color: HexColor,
    /// Base line width in world units.
    pub size: f64,
    pub opacity: f64,
    /// Raw input samples, at least one.
    pub points: Vec<StrokePoint>,
    /// Catmull-Rom resampling of `points`, attached to long pen strokes on commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothed_points: Option<Vec<StrokePoint>>,
}

impl Stroke {
    /// Start a stroke at its first sample.
    ///
    /// Highlighter strokes have their size multiplied by [`HIGHLIGHT_SIZE_FACTOR`]
    /// here, so the size slider keeps its units across tools.
    pub fn begin(
        tool: StrokeTool,
        color: HexColor,
        size: f64,
        opacity: f64,
        first: StrokePoint,
    ) -> Self {
        let size = match tool {
            StrokeTool::Highlight => size * HIGHLIGHT_SIZE_FACTOR,
            StrokeTool::Pen | StrokeTool::Eraser => size,
        };
        Self {
            id: Uuid::new_v4(),
            tool,
            color,
            size,
            opacity,
            points: vec![first],
            smoothed_points: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Append a sample to the path.
    pub fn add_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    /// Number of raw samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Attach smoothed points if this is a pen stroke with enough samples.
    ///
    /// Eraser and highlighter strokes keep their raw points.
    pub fn finish(mut self) -> Self {
        if self.tool == StrokeTool::Pen && self.points.len() > SMOOTHING_MIN_POINTS {
            self.smoothed_points = Some(smooth(&self.points));
        }
        self
    }

    /// Points used to draw a committed stroke: smoothed if present, raw otherwise.
    pub fn render_points(&self) -> &[StrokePoint] {
        self.smoothed_points.as_deref().unwrap_or(&self.points)
    }

    /// Line width of the segment ending at `end`.
    pub fn segment_width(&self, end: &StrokePoint) -> f64 {
        match self.tool {
            StrokeTool::Eraser => self.size * ERASER_WIDTH_FACTOR,
            StrokeTool::Highlight => self.size,
            StrokeTool::Pen => {
                let pressure = clamp(end.pressure, 0.05, 1.0);
                self.size * (0.4 + pressure * 0.9)
            }
        }
    }

    /// Bounding box of the raw points (ignoring line width).
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(first.to_point(), first.to_point()), |r, p| {
                r.union_pt(p.to_point())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen(points: &[(f64, f64)]) -> Stroke {
        let mut iter = points.iter();
        let &(x, y) = iter.next().unwrap();
        let mut stroke = Stroke::begin(
            StrokeTool::Pen,
            HexColor::white(),
            4.0,
            1.0,
            StrokePoint::new(x, y, 0.5),
        );
        for &(x, y) in iter {
            stroke.add_point(StrokePoint::new(x, y, 0.5));
        }
        stroke
    }

    #[test]
    fn test_pressure_defaults() {
        let p = StrokePoint::from_world(Point::new(1.0, 2.0), None);
        assert!((p.pressure - DEFAULT_PRESSURE).abs() < f64::EPSILON);

        let p = StrokePoint::from_world(Point::new(1.0, 2.0), Some(0.0));
        assert!((p.pressure - DEFAULT_PRESSURE).abs() < f64::EPSILON);

        let p = StrokePoint::from_world(Point::new(1.0, 2.0), Some(0.8));
        assert!((p.pressure - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_highlight_size_multiplied() {
        let stroke = Stroke::begin(
            StrokeTool::Highlight,
            HexColor::white(),
            4.0,
            1.0,
            StrokePoint::new(0.0, 0.0, 0.5),
        );
        assert!((stroke.size - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finish_smooths_long_pen_strokes() {
        let stroke = pen(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0), (30.0, 0.0)]).finish();
        let smoothed = stroke.smoothed_points.as_ref().unwrap();
        assert!(smoothed.len() > stroke.points.len());
        assert_eq!(stroke.render_points().len(), smoothed.len());
    }

    #[test]
    fn test_finish_keeps_three_point_strokes_raw() {
        let stroke = pen(&[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)]).finish();
        assert!(stroke.smoothed_points.is_none());
        assert_eq!(stroke.render_points().len(), 3);
    }

    #[test]
    fn test_finish_skips_eraser() {
        let mut stroke = Stroke::begin(
            StrokeTool::Eraser,
            HexColor::white(),
            4.0,
            1.0,
            StrokePoint::new(0.0, 0.0, 0.5),
        );
        for i in 1..10 {
            stroke.add_point(StrokePoint::new(i as f64, 0.0, 0.5));
        }
        assert!(stroke.finish().smoothed_points.is_none());
    }

    #[test]
    fn test_segment_width_rules() {
        let mut stroke = pen(&[(0.0, 0.0)]);
        let light = StrokePoint::new(0.0, 0.0, 0.0);
        let full = StrokePoint::new(0.0, 0.0, 1.0);
        // Pressure is clamped to 0.05 at the low end.
        assert!((stroke.segment_width(&light) - 4.0 * (0.4 + 0.05 * 0.9)).abs() < 1e-12);
        assert!((stroke.segment_width(&full) - 4.0 * 1.3).abs() < 1e-12);

        stroke.tool = StrokeTool::Eraser;
        assert!((stroke.segment_width(&light) - 10.0).abs() < 1e-12);

        stroke.tool = StrokeTool::Highlight;
        assert!((stroke.segment_width(&light) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds() {
        let stroke = pen(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)]);
        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_omits_missing_smoothing() {
        let stroke = pen(&[(0.0, 0.0), (1.0, 1.0)]);
        let json = serde_json::to_string(&stroke).unwrap();
        assert!(!json.contains("smoothed_points"));
        assert!(json.contains("\"pen\""));
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }
}
