//! Drawing surface abstraction.

use crate::font;
use kurbo::{Affine, Ellipse, PathEl, Point, Rect, Shape as _};
use peniko::{Color, Compose};

/// Flattening tolerance for curved outlines, in device pixels.
const FLATTEN_TOLERANCE: f64 = 0.2;

/// How a draw call is colored and composited.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    /// Color including its alpha.
    pub color: Color,
    pub compose: Compose,
}

impl Paint {
    /// Source-over paint.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            compose: Compose::SrcOver,
        }
    }

    /// Multiply the paint's alpha by `opacity`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.color = self.color.multiply_alpha(opacity.clamp(0.0, 1.0) as f32);
        self
    }

    /// Destination-out paint that removes whatever is underneath.
    pub fn erase() -> Self {
        Self {
            color: Color::BLACK,
            compose: Compose::DestOut,
        }
    }
}

/// A 2D target the board renderer draws into.
///
/// Geometry passed to the drawing methods is mapped through the current
/// transform; widths and radii scale with it.
pub trait Surface {
    /// Size in device pixels.
    fn size(&self) -> (u32, u32);

    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Color);

    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// A single round-capped line segment.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint);

    /// A round-joined open path, composited once so joints are not double-covered.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, paint: &Paint);

    /// Ellipse outline, flattened into a closed polyline.
    fn stroke_ellipse(&mut self, ellipse: &Ellipse, width: f64, paint: &Paint) {
        let scale = self.transform().determinant().abs().sqrt().max(f64::EPSILON);
        let tolerance = FLATTEN_TOLERANCE / scale;
        let mut points = Vec::new();
        let mut start = None;
        kurbo::flatten(ellipse.path_elements(tolerance), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                start = Some(p);
                points.push(p);
            }
            PathEl::LineTo(p) => points.push(p),
            PathEl::ClosePath => {
                if let Some(p) = start {
                    points.push(p);
                }
            }
            _ => {}
        });
        self.stroke_polyline(&points, width, paint);
    }

    /// Draw `text` with its left edge and baseline at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, font_size: f64, paint: &Paint) {
        for rect in font::glyph_rects(text, origin, font_size) {
            self.fill_rect(rect, paint);
        }
    }
}
