//! View transform for pan/zoom.

use crate::geometry::{clamp, to_screen, to_world};
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.05;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 8.0;
/// Zoom factor applied per wheel notch towards the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
/// Zoom factor applied per wheel notch away from the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.91;

/// Camera maps world coordinates to screen pixels: `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Translation in screen pixels.
    pub offset: Vec2,
    /// Zoom factor, kept within [`MIN_SCALE`, `MAX_SCALE`].
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Identity view.
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen affine for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Screen-to-world affine for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        to_world(screen_point, self)
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        to_screen(world_point, self)
    }

    /// Shift the view by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping `screen_point` fixed on screen.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = clamp(self.scale * factor, MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        let cursor = screen_point.to_vec2();
        self.offset = cursor - (cursor - self.offset) * ratio;
        self.scale = new_scale;
    }

    /// Apply one wheel event: negative `delta_y` zooms in.
    pub fn wheel_zoom(&mut self, screen_point: Point, delta_y: f64) {
        let factor = if delta_y < 0.0 {
            WHEEL_ZOOM_IN
        } else {
            WHEEL_ZOOM_OUT
        };
        self.zoom_at(screen_point, factor);
    }

    /// Reset to the identity view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}
