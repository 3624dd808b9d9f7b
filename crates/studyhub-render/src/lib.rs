//! StudyHub Render Library
//!
//! Drawing-surface abstraction, the board renderer, and a CPU raster backend
//! used for headless frames and PNG export.

mod export;
pub mod font;
mod raster;
mod renderer;
mod surface;

pub use export::{MAX_EXPORT_EDGE, encode_png, export_png, render_image, render_png};
pub use raster::RasterSurface;
pub use renderer::{
    GRID_SPACING, GridStyle, HIGHLIGHT_OPACITY, RenderContext, RenderResult, RendererError,
    background_color, render,
};
pub use surface::{Paint, Surface};
