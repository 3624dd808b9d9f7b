//! Coordinate conversion, clamping and stroke smoothing.

use crate::camera::Camera;
use crate::shapes::StrokePoint;
use kurbo::Point;

/// Catmull-Rom steps per segment (samples at t = 0, 0.2, .., 1.0).
const SMOOTH_STEPS: usize = 5;

/// Clamp `v` into `[lo, hi]`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Whether both coordinates are usable numbers.
pub fn is_finite_point(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Convert a canvas-relative screen position to world coordinates.
pub fn to_world(screen: Point, camera: &Camera) -> Point {
    Point::new(
        (screen.x - camera.offset.x) / camera.scale,
        (screen.y - camera.offset.y) / camera.scale,
    )
}

/// Convert a world position to canvas-relative screen coordinates.
pub fn to_screen(world: Point, camera: &Camera) -> Point {
    Point::new(
        world.x * camera.scale + camera.offset.x,
        world.y * camera.scale + camera.offset.y,
    )
}

/// Resample a stroke through a Catmull-Rom spline.
///
/// Each segment `p1 -> p2` is sampled at t = 0, 0.2, .., 1.0 using the window
/// `p0, p1, p2, p3` with endpoints duplicated at the boundaries. Samples carry
/// the pressure of the segment's starting point; pressure is not interpolated.
/// Inputs with fewer than three points are returned unchanged.
pub fn smooth(points: &[StrokePoint]) -> Vec<StrokePoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * (SMOOTH_STEPS + 1));

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        for step in 0..=SMOOTH_STEPS {
            let t = step as f64 / SMOOTH_STEPS as f64;
            out.push(StrokePoint::new(
                catmull_rom(p0.x, p1.x, p2.x, p3.x, t),
                catmull_rom(p0.y, p1.y, p2.y, p3.y, t),
                p1.pressure,
            ));
        }
    }

    out
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + p2) * t
        + 2.0 * p1)
}
