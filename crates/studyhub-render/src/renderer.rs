//! Scene renderer.

use crate::surface::{Paint, Surface};
use kurbo::{Affine, Point};
use peniko::Color;
use studyhub_core::camera::Camera;
use studyhub_core::export::ExportError;
use studyhub_core::geometry::clamp;
use studyhub_core::scene::Scene;
use studyhub_core::shapes::{
    ERASER_WIDTH_FACTOR, LiveElement, Shape, ShapeKind, Stroke, StrokeTool, TextAnnotation,
};
use thiserror::Error;

/// Board background, `#03030a`.
pub fn background_color() -> Color {
    Color::from_rgba8(3, 3, 10, 255)
}

/// World-space spacing of the dot grid.
pub const GRID_SPACING: f64 = 28.0;
/// Alpha of grid dots over the background.
pub const GRID_ALPHA: f32 = 0.035;
/// Highlighter strokes are always drawn at this opacity.
pub const HIGHLIGHT_OPACITY: f64 = 0.28;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain background.
    None,
    /// Faint dots at every grid intersection.
    #[default]
    Dots,
}

impl GridStyle {
    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: Camera,
    /// In-progress element, drawn last from its raw points.
    pub live: Option<LiveElement<'a>>,
    pub background_color: Color,
    pub grid_style: GridStyle,
    /// World-space grid spacing.
    pub grid_spacing: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, camera: Camera) -> Self {
        Self {
            scene,
            camera,
            live: None,
            background_color: background_color(),
            grid_style: GridStyle::Dots,
            grid_spacing: GRID_SPACING,
        }
    }

    pub fn with_live(mut self, live: Option<LiveElement<'a>>) -> Self {
        self.live = live;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f64) -> Self {
        if spacing.is_finite() && spacing > 0.0 {
            self.grid_spacing = spacing;
        }
        self
    }
}

/// Paint one frame: background, grid, committed elements, then the live element.
pub fn render(surface: &mut dyn Surface, ctx: &RenderContext) {
    surface.set_transform(Affine::IDENTITY);
    surface.clear(ctx.background_color);

    if ctx.grid_style == GridStyle::Dots {
        render_grid_dots(surface, &ctx.camera, ctx.grid_spacing);
    }

    surface.set_transform(ctx.camera.transform());

    for stroke in ctx.scene.strokes() {
        render_stroke(surface, stroke, false);
    }
    for shape in ctx.scene.shapes() {
        render_shape(surface, shape);
    }
    for text in ctx.scene.texts() {
        render_text(surface, text);
    }

    match ctx.live {
        Some(LiveElement::Stroke(stroke)) => render_stroke(surface, stroke, true),
        Some(LiveElement::Shape(shape)) => render_shape(surface, shape),
        None => {}
    }

    surface.set_transform(Affine::IDENTITY);
}

/// Screen-space dot grid that follows pan and zoom.
fn render_grid_dots(surface: &mut dyn Surface, camera: &Camera, spacing: f64) {
    let step = spacing * camera.scale;
    if !step.is_finite() || step <= 0.0 {
        return;
    }
    let origin_x = ((camera.offset.x % step) + step) % step;
    let origin_y = ((camera.offset.y % step) + step) % step;
    let radius = clamp(camera.scale * 0.7, 0.5, 2.0);
    let paint = Paint::new(Color::WHITE.with_alpha(GRID_ALPHA));

    let (width, height) = surface.size();
    let (width, height) = (f64::from(width), f64::from(height));
    let mut x = origin_x;
    while x < width {
        let mut y = origin_y;
        while y < height {
            surface.fill_circle(Point::new(x, y), radius, &paint);
            y += step;
        }
        x += step;
    }
}

/// Draw a stroke. Live strokes use raw points; committed ones prefer smoothed points.
fn render_stroke(surface: &mut dyn Surface, stroke: &Stroke, live: bool) {
    let points = if live {
        &stroke.points[..]
    } else {
        stroke.render_points()
    };
    if points.len() < 2 {
        return;
    }

    match stroke.tool {
        StrokeTool::Eraser => {
            let path: Vec<Point> = points.iter().map(|p| p.to_point()).collect();
            surface.stroke_polyline(&path, stroke.size * ERASER_WIDTH_FACTOR, &Paint::erase());
        }
        StrokeTool::Highlight => {
            let path: Vec<Point> = points.iter().map(|p| p.to_point()).collect();
            let paint = Paint::new(stroke.color.to_color()).with_opacity(HIGHLIGHT_OPACITY);
            surface.stroke_polyline(&path, stroke.size, &paint);
        }
        StrokeTool::Pen => {
            let paint = Paint::new(stroke.color.to_color()).with_opacity(stroke.opacity);
            for pair in points.windows(2) {
                let width = stroke.segment_width(&pair[1]);
                surface.stroke_line(pair[0].to_point(), pair[1].to_point(), width, &paint);
            }
        }
    }
}

fn render_shape(surface: &mut dyn Surface, shape: &Shape) {
    let paint = Paint::new(shape.color.to_color()).with_opacity(shape.opacity);
    match shape.tool {
        ShapeKind::Rect => {
            let r = shape.bounds();
            let outline = [
                Point::new(r.x0, r.y0),
                Point::new(r.x1, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
                Point::new(r.x0, r.y0),
            ];
            surface.stroke_polyline(&outline, shape.size, &paint);
        }
        ShapeKind::Circle => surface.stroke_ellipse(&shape.ellipse(), shape.size, &paint),
    }
}

fn render_text(surface: &mut dyn Surface, text: &TextAnnotation) {
    let paint = Paint::new(text.color.to_color());
    surface.draw_text(text.anchor(), &text.text, text.size, &paint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterSurface;
    use kurbo::Vec2;
    use studyhub_core::camera::MIN_SCALE;
    use studyhub_core::shapes::{HexColor, StrokePoint};

    const W: u32 = 120;
    const H: u32 = 80;

    fn pen_stroke(tool: StrokeTool, color: HexColor, size: f64, points: &[(f64, f64)]) -> Stroke {
        let mut stroke = Stroke::begin(
            tool,
            color,
            size,
            1.0,
            StrokePoint::new(points[0].0, points[0].1, 1.0),
        );
        for &(x, y) in &points[1..] {
            stroke.add_point(StrokePoint::new(x, y, 1.0));
        }
        stroke
    }

    fn draw(scene: &Scene, camera: Camera, grid: GridStyle) -> RasterSurface {
        let mut surface = RasterSurface::new(W, H);
        let ctx = RenderContext::new(scene, camera).with_grid(grid);
        render(&mut surface, &ctx);
        surface
    }

    #[test]
    fn test_empty_scene_is_background() {
        let surface = draw(&Scene::new(), Camera::new(), GridStyle::None);
        assert!(surface.image().pixels().all(|p| p.0 == [3, 3, 10, 255]));
    }

    #[test]
    fn test_grid_dots_are_faint() {
        let surface = draw(&Scene::new(), Camera::new(), GridStyle::Dots);
        let dot = surface.pixel(28, 28).unwrap();
        assert_ne!(dot, [3, 3, 10, 255]);
        assert!(dot[0] < 20);
        assert_eq!(surface.pixel(14, 14), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_grid_drawn_at_min_zoom() {
        let mut camera = Camera::new();
        camera.scale = MIN_SCALE;
        let surface = draw(&Scene::new(), camera, GridStyle::Dots);
        let tinted: Vec<_> = surface
            .image()
            .pixels()
            .filter(|p| p.0 != [3, 3, 10, 255])
            .collect();
        assert!(!tinted.is_empty());
        // Dense dots still read as a faint wash.
        assert!(tinted.iter().all(|p| p.0[0] < 60));
    }

    #[test]
    fn test_grid_style_names() {
        assert_eq!(GridStyle::default().name(), "Dots");
        assert_eq!(GridStyle::None.name(), "None");
    }

    #[test]
    fn test_grid_follows_pan() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(-18.0, 10.0);
        let surface = draw(&Scene::new(), camera, GridStyle::Dots);
        // (-18 mod 28) normalised is 10.
        assert_ne!(surface.pixel(10, 10).unwrap(), [3, 3, 10, 255]);
        assert_eq!(surface.pixel(0, 0), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_single_point_stroke_draws_nothing() {
        let stroke = pen_stroke(StrokeTool::Pen, HexColor::white(), 10.0, &[(60.0, 40.0)]);
        let surface = draw(&Scene::new().with_stroke(stroke), Camera::new(), GridStyle::None);
        assert_eq!(surface.pixel(60, 40), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_pen_stroke_drawn_in_world_space() {
        let stroke = pen_stroke(StrokeTool::Pen, HexColor::white(), 4.0, &[(10.0, 10.0), (30.0, 10.0)]);
        let mut camera = Camera::new();
        camera.scale = 2.0;
        camera.offset = Vec2::new(5.0, 5.0);
        let surface = draw(&Scene::new().with_stroke(stroke), camera, GridStyle::None);

        // World (20, 10) -> screen (45, 25).
        assert_eq!(surface.pixel(45, 25), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(45, 40), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_eraser_removes_underlying_pixels() {
        let ink = pen_stroke(StrokeTool::Pen, HexColor::white(), 10.0, &[(10.0, 40.0), (110.0, 40.0)]);
        let before = draw(&Scene::new().with_stroke(ink.clone()), Camera::new(), GridStyle::None);
        assert_eq!(before.pixel(60, 40), Some([255, 255, 255, 255]));

        let eraser = pen_stroke(StrokeTool::Eraser, HexColor::white(), 4.0, &[(60.0, 10.0), (60.0, 70.0)]);
        let scene = Scene::new().with_stroke(ink).with_stroke(eraser);
        let after = draw(&scene, Camera::new(), GridStyle::None);

        assert_eq!(after.pixel(60, 40).unwrap()[3], 0);
        assert_eq!(after.pixel(20, 40), Some([255, 255, 255, 255]));
        let changed = before
            .image()
            .pixels()
            .zip(after.image().pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 0);
    }

    #[test]
    fn test_highlight_is_translucent() {
        let stroke = pen_stroke(StrokeTool::Highlight, HexColor::white(), 2.0, &[(10.0, 40.0), (110.0, 40.0)]);
        assert!((stroke.size - 12.0).abs() < f64::EPSILON);
        let surface = draw(&Scene::new().with_stroke(stroke), Camera::new(), GridStyle::None);
        let [r, _, _, a] = surface.pixel(60, 40).unwrap();
        assert_eq!(a, 255);
        // 0.28 * 255 + 0.72 * 3, within rounding.
        assert!((i32::from(r) - 73).abs() <= 1);
        // Width 12: covered 5px off the centre line, not 8px off.
        assert_ne!(surface.pixel(60, 45), Some([3, 3, 10, 255]));
        assert_eq!(surface.pixel(60, 48), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_live_stroke_uses_raw_points() {
        let mut stroke = pen_stroke(
            StrokeTool::Pen,
            HexColor::white(),
            2.0,
            &[(10.0, 10.0), (60.0, 10.0), (60.0, 60.0), (10.0, 60.0)],
        );
        stroke = stroke.finish();
        assert!(stroke.smoothed_points.is_some());

        let scene = Scene::new();
        let mut surface = RasterSurface::new(W, H);
        let ctx = RenderContext::new(&scene, Camera::new())
            .with_grid(GridStyle::None)
            .with_live(Some(LiveElement::Stroke(&stroke)));
        render(&mut surface, &ctx);
        assert_eq!(surface.pixel(35, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_rect_outline_not_filled() {
        let mut shape = Shape::begin(ShapeKind::Rect, Point::new(20.0, 20.0), HexColor::white(), 2.0, 1.0);
        shape.set_second_corner(Point::new(80.0, 60.0));
        let surface = draw(&Scene::new().with_shape(shape), Camera::new(), GridStyle::None);
        assert_eq!(surface.pixel(50, 20).unwrap(), [255, 255, 255, 255]);
        assert_eq!(surface.pixel(50, 40), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_circle_outline_inscribed() {
        let mut shape = Shape::begin(ShapeKind::Circle, Point::new(20.0, 0.0), HexColor::white(), 2.0, 1.0);
        shape.set_second_corner(Point::new(100.0, 80.0));
        let surface = draw(&Scene::new().with_shape(shape), Camera::new(), GridStyle::None);
        // Leftmost point of the circle is (20, 40).
        assert!(surface.pixel(20, 40).unwrap()[0] > 150);
        assert_eq!(surface.pixel(60, 40), Some([3, 3, 10, 255]));
        assert_eq!(surface.pixel(21, 1), Some([3, 3, 10, 255]));
    }

    #[test]
    fn test_text_drawn_above_baseline() {
        let text = TextAnnotation::new(Point::new(10.0, 50.0), "I", HexColor::white(), 20.0).unwrap();
        let surface = draw(&Scene::new().with_text(text), Camera::new(), GridStyle::None);
        // 'I' top bar spans cells 1..4 at the top row (y 36..38), stem at column 2.
        assert_eq!(surface.pixel(16, 36), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(15, 45), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(15, 52), Some([3, 3, 10, 255]));
    }
}
