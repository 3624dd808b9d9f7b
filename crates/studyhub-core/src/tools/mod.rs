//! Tool selection and drawing settings.

use crate::shapes::{HexColor, ShapeKind, StrokeTool};
use serde::{Deserialize, Serialize};

/// Toolbar color presets.
pub const PALETTE: [HexColor; 10] = [
    HexColor::new(0x00, 0xff, 0xb3),
    HexColor::new(0xff, 0xff, 0xff),
    HexColor::new(0xf5, 0xa6, 0x23),
    HexColor::new(0xff, 0x44, 0x66),
    HexColor::new(0x55, 0x77, 0xff),
    HexColor::new(0x33, 0xff, 0x88),
    HexColor::new(0xbb, 0x88, 0xff),
    HexColor::new(0xff, 0x88, 0x00),
    HexColor::new(0x00, 0xcc, 0xff),
    HexColor::new(0xff, 0xdd, 0x00),
];

/// Size slider bounds.
pub const MIN_SIZE: f64 = 1.0;
pub const MAX_SIZE: f64 = 60.0;

/// Opacity slider bounds.
pub const MIN_OPACITY: f64 = 0.1;
pub const MAX_OPACITY: f64 = 1.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Highlight,
    Eraser,
    Text,
    Rect,
    Circle,
    Pan,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pen,
        ToolKind::Highlight,
        ToolKind::Eraser,
        ToolKind::Text,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Pan,
    ];

    /// Tool selected by a single-letter hotkey.
    pub fn from_hotkey(key: &str) -> Option<Self> {
        match key {
            "p" => Some(ToolKind::Pen),
            "h" => Some(ToolKind::Highlight),
            "e" => Some(ToolKind::Eraser),
            "t" => Some(ToolKind::Text),
            "r" => Some(ToolKind::Rect),
            "c" => Some(ToolKind::Circle),
            _ => None,
        }
    }

    /// Toolbar label including the shortcut.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen (P)",
            ToolKind::Highlight => "Highlight (H)",
            ToolKind::Eraser => "Eraser (E)",
            ToolKind::Text => "Text (T)",
            ToolKind::Rect => "Rectangle (R)",
            ToolKind::Circle => "Circle (C)",
            ToolKind::Pan => "Pan (Space/Mid)",
        }
    }

    /// The stroke tool this maps to, if it draws freehand ink.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Highlight => Some(StrokeTool::Highlight),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            _ => None,
        }
    }

    /// The outline kind this maps to, if it drags out a shape.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rect => Some(ShapeKind::Rect),
            ToolKind::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

/// Current tool, color, size and opacity applied to new elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: HexColor,
    size: f64,
    opacity: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: PALETTE[0],
            size: 4.0,
            opacity: 1.0,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Set the size, clamped to the slider range. Non-finite values are ignored.
    pub fn set_size(&mut self, size: f64) {
        if size.is_finite() {
            self.size = size.clamp(MIN_SIZE, MAX_SIZE);
        }
    }

    /// Set the opacity, clamped to the slider range. Non-finite values are ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(MIN_OPACITY, MAX_OPACITY);
        }
    }
}
