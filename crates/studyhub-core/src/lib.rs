//! StudyHub Core Library
//!
//! Platform-agnostic data structures and logic for the StudyHub whiteboard:
//! the scene model with undo history, the view transform, and the gesture
//! controller that turns device input into committed elements.

pub mod camera;
pub mod controller;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod redraw;
pub mod scene;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use camera::{Camera, MAX_SCALE, MIN_SCALE};
pub use controller::{Cursor, GestureMode, TextPrompt, Whiteboard};
pub use export::{DirectoryExportSink, ExportError, ExportOutcome, ExportSink, default_export_name};
pub use history::{BoardAction, BoardState, History, UNDO_LIMIT};
pub use input::{InputEvent, KeyEvent, KeyInput, Modifiers, MouseButton, PointerEvent, PointerInput, WheelInput};
pub use redraw::RedrawScheduler;
pub use scene::Scene;
pub use shapes::{HexColor, LiveElement, Shape, ShapeKind, Stroke, StrokePoint, StrokeTool, TextAnnotation};
pub use storage::{BoardStore, FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{PALETTE, ToolKind, ToolSettings};
