//! Offscreen rendering and PNG export.

use crate::raster::RasterSurface;
use crate::renderer::{RenderContext, RenderResult, RendererError, render};
use image::RgbaImage;
use studyhub_core::export::{ExportOutcome, ExportSink};

/// Largest edge accepted for an offscreen render.
pub const MAX_EXPORT_EDGE: u32 = 16_384;

/// Render a frame into a fresh image of `width` x `height` pixels.
pub fn render_image(ctx: &RenderContext, width: u32, height: u32) -> RenderResult<RgbaImage> {
    if width == 0 || height == 0 || width > MAX_EXPORT_EDGE || height > MAX_EXPORT_EDGE {
        return Err(RendererError::InvalidSize { width, height });
    }
    let mut surface = RasterSurface::new(width, height);
    render(&mut surface, ctx);
    Ok(surface.into_image())
}

/// Encode an RGBA8 image as PNG.
pub fn encode_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RendererError::Encode(e.to_string()))?;
    }
    Ok(bytes)
}

/// Render and encode in one step.
pub fn render_png(ctx: &RenderContext, width: u32, height: u32) -> RenderResult<Vec<u8>> {
    encode_png(&render_image(ctx, width, height)?)
}

/// Render the frame and hand the PNG to `sink`.
///
/// The scene is only read; a failed or cancelled export leaves it untouched.
pub fn export_png(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    sink: &dyn ExportSink,
    suggested_name: &str,
) -> RenderResult<ExportOutcome> {
    let bytes = render_png(ctx, width, height)?;
    let outcome = sink.save_image(&bytes, suggested_name)?;
    match &outcome {
        ExportOutcome::Saved(path) => log::info!("Exported board to {}", path.display()),
        ExportOutcome::Cancelled => log::info!("Export cancelled"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::GridStyle;
    use studyhub_core::camera::Camera;
    use studyhub_core::export::{DirectoryExportSink, ExportError};
    use studyhub_core::scene::Scene;
    use std::cell::RefCell;

    struct RecordingSink {
        saved: RefCell<Vec<(usize, String)>>,
    }

    impl ExportSink for RecordingSink {
        fn save_image(&self, bytes: &[u8], name: &str) -> Result<ExportOutcome, ExportError> {
            self.saved.borrow_mut().push((bytes.len(), name.to_string()));
            Ok(ExportOutcome::Cancelled)
        }
    }

    struct FailingSink;

    impl ExportSink for FailingSink {
        fn save_image(&self, _: &[u8], _: &str) -> Result<ExportOutcome, ExportError> {
            Err(ExportError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn test_invalid_size_rejected() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Camera::new());
        assert!(matches!(
            render_image(&ctx, 0, 10),
            Err(RendererError::InvalidSize { width: 0, height: 10 })
        ));
        assert!(render_image(&ctx, MAX_EXPORT_EDGE + 1, 1).is_err());
    }

    #[test]
    fn test_png_decodes_to_rendered_pixels() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Camera::new()).with_grid(GridStyle::None);
        let bytes = render_png(&ctx, 16, 8).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(5, 5).0, [3, 3, 10, 255]);
    }

    #[test]
    fn test_export_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryExportSink::new(dir.path());
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Camera::new());

        let outcome = export_png(&ctx, 10, 10, &sink, "px-study-1.png").unwrap();
        let path = dir.path().join("px-study-1.png");
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
        assert!(image::open(path).is_ok());
    }

    #[test]
    fn test_export_sink_outcomes() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Camera::new());

        let sink = RecordingSink {
            saved: RefCell::new(Vec::new()),
        };
        assert_eq!(
            export_png(&ctx, 4, 4, &sink, "x.png").unwrap(),
            ExportOutcome::Cancelled
        );
        assert_eq!(sink.saved.borrow()[0].1, "x.png");

        let result = export_png(&ctx, 4, 4, &FailingSink, "x.png");
        assert!(matches!(result, Err(RendererError::Export(ExportError::Unavailable(_)))));
    }
}
