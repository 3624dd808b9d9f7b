//! CPU raster surface backed by an RGBA8 image buffer.

use crate::surface::{Paint, Surface};
use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::{Color, Compose};

/// Per-pixel coverage over a clipped device-space region.
struct CoverageMask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    /// A zeroed mask over `bounds` clipped to the surface, or `None` if nothing is visible.
    fn new(bounds: Rect, surface_width: u32, surface_height: u32) -> Option<Self> {
        if !(bounds.x0.is_finite()
            && bounds.y0.is_finite()
            && bounds.x1.is_finite()
            && bounds.y1.is_finite())
        {
            return None;
        }
        let x0 = bounds.x0.floor().max(0.0);
        let y0 = bounds.y0.floor().max(0.0);
        let x1 = bounds.x1.ceil().min(f64::from(surface_width));
        let y1 = bounds.y1.ceil().min(f64::from(surface_height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let (x0, y0) = (x0 as u32, y0 as u32);
        let (width, height) = (x1 as u32 - x0, y1 as u32 - y0);
        Some(Self {
            x0,
            y0,
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        })
    }

    /// Raise coverage to `f(pixel_center)` wherever that is larger, within `bounds`.
    fn accumulate(&mut self, bounds: Rect, f: impl Fn(Point) -> f64) {
        let x_start = (bounds.x0.floor().max(f64::from(self.x0))) as u32;
        let y_start = (bounds.y0.floor().max(f64::from(self.y0))) as u32;
        let x_end = (bounds.x1.ceil().min(f64::from(self.x0 + self.width))).max(0.0) as u32;
        let y_end = (bounds.y1.ceil().min(f64::from(self.y0 + self.height))).max(0.0) as u32;

        for py in y_start..y_end {
            for px in x_start..x_end {
                let center = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
                let coverage = f(center).clamp(0.0, 1.0) as f32;
                let index = ((py - self.y0) * self.width + (px - self.x0)) as usize;
                if coverage > self.data[index] {
                    self.data[index] = coverage;
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab: Vec2 = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}

/// Coverage of a pixel centred at distance `d` from the centre line of a stroke.
fn stroke_coverage(d: f64, width: f64) -> f64 {
    let half = width * 0.5;
    let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
    // Hairlines fade rather than vanish.
    if width < 1.0 { coverage * width } else { coverage }
}

/// Software rasteriser implementing [`Surface`] on an [`RgbaImage`].
///
/// Pixels are straight (non-premultiplied) RGBA8. Coverage is computed
/// analytically per pixel for anti-aliased edges.
pub struct RasterSurface {
    image: RgbaImage,
    transform: Affine,
}

impl RasterSurface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            transform: Affine::IDENTITY,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Uniform scale factor of the current transform, applied to widths and radii.
    fn linear_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    fn device_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.transform * p).collect()
    }

    fn stroke_device_segments(&mut self, points: &[Point], width: f64, paint: &Paint) {
        if points.is_empty() || !width.is_finite() || width <= 0.0 {
            return;
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return;
        }
        let pad = width * 0.5 + 1.0;
        let bounds = points
            .iter()
            .fold(Rect::from_points(points[0], points[0]), |r, &p| r.union_pt(p))
            .inflate(pad, pad);
        let (w, h) = self.image.dimensions();
        let Some(mut mask) = CoverageMask::new(bounds, w, h) else {
            return;
        };

        if points.len() == 1 {
            let a = points[0];
            mask.accumulate(Rect::from_points(a, a).inflate(pad, pad), |p| {
                stroke_coverage((p - a).hypot(), width)
            });
        }
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment_bounds = Rect::from_points(a, b).inflate(pad, pad);
            mask.accumulate(segment_bounds, |p| {
                stroke_coverage(segment_distance(p, a, b), width)
            });
        }
        self.composite(&mask, paint);
    }

    fn composite(&mut self, mask: &CoverageMask, paint: &Paint) {
        let src = paint.color.to_rgba8();
        let src_alpha = f32::from(src.a) / 255.0;
        let src_rgb = [src.r, src.g, src.b].map(|c| f32::from(c) / 255.0);

        for my in 0..mask.height {
            for mx in 0..mask.width {
                let coverage = mask.data[(my * mask.width + mx) as usize];
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = src_alpha * coverage;
                let pixel = self.image.get_pixel_mut(mask.x0 + mx, mask.y0 + my);
                *pixel = blend(*pixel, src_rgb, alpha, paint.compose);
            }
        }
    }
}

/// Porter-Duff blend of a straight-alpha source into a straight-alpha pixel.
fn blend(dst: Rgba<u8>, src_rgb: [f32; 3], src_alpha: f32, compose: Compose) -> Rgba<u8> {
    let [dr, dg, db, da] = dst.0;
    let dst_alpha = f32::from(da) / 255.0;

    match compose {
        Compose::DestOut => {
            let out_alpha = dst_alpha * (1.0 - src_alpha);
            Rgba([dr, dg, db, to_u8(out_alpha)])
        }
        // Everything else draws source-over.
        _ => {
            let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
            if out_alpha <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let dst_rgb = [dr, dg, db].map(|c| f32::from(c) / 255.0);
            let mix = |s: f32, d: f32| {
                to_u8((s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha)
            };
            Rgba([
                mix(src_rgb[0], dst_rgb[0]),
                mix(src_rgb[1], dst_rgb[1]),
                mix(src_rgb[2], dst_rgb[2]),
                to_u8(out_alpha),
            ])
        }
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Color) {
        let c = color.to_rgba8();
        let fill = Rgba([c.r, c.g, c.b, c.a]);
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        // Exact area coverage; rotation is not needed by the board and the
        // rectangle is mapped to its device-space bounding box.
        let device = self.transform.transform_rect_bbox(rect);
        let (w, h) = self.image.dimensions();
        let Some(mut mask) = CoverageMask::new(device, w, h) else {
            return;
        };
        mask.accumulate(device, |center| {
            let (px, py) = (center.x - 0.5, center.y - 0.5);
            let cover_x = (device.x1.min(px + 1.0) - device.x0.max(px)).max(0.0);
            let cover_y = (device.y1.min(py + 1.0) - device.y0.max(py)).max(0.0);
            cover_x * cover_y
        });
        self.composite(&mask, paint);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let c = self.transform * center;
        let r = radius * self.linear_scale();
        if !r.is_finite() || r <= 0.0 {
            return;
        }
        let bounds = Rect::from_center_size(c, (2.0 * r + 2.0, 2.0 * r + 2.0));
        let (w, h) = self.image.dimensions();
        let Some(mut mask) = CoverageMask::new(bounds, w, h) else {
            return;
        };
        mask.accumulate(bounds, |p| (r + 0.5 - (p - c).hypot()).min(2.0 * r));
        self.composite(&mask, paint);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint) {
        let points = self.device_points(&[from, to]);
        let width = width * self.linear_scale();
        self.stroke_device_segments(&points, width, paint);
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, paint: &Paint) {
        let points = self.device_points(points);
        let width = width * self.linear_scale();
        self.stroke_device_segments(&points, width, paint);
    }
}
