use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaintError;

pub mod fill;
mod freehand;
mod shape;

pub use fill::{fill_surface, fill_would_change, flood_fill};
pub use freehand::FreehandStroke;
pub use shape::{ShapeField, ShapeGeometry, ShapeKind, trace_shape};

/// Extra width the eraser adds on top of the configured stroke width
pub const ERASER_EXTRA_WIDTH: f32 = 10.0;

/// The drawing tools. Shapes share one variant since they only differ in
/// how their geometry is traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Fill,
    Shape(ShapeKind),
}

impl ToolKind {
    pub const LINE: ToolKind = ToolKind::Shape(ShapeKind::Line);
    pub const SQUARE: ToolKind = ToolKind::Shape(ShapeKind::Square);
    pub const CIRCLE: ToolKind = ToolKind::Shape(ShapeKind::Circle);
    pub const TRIANGLE: ToolKind = ToolKind::Shape(ShapeKind::Triangle);

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pen,
            ToolKind::Eraser,
            ToolKind::Fill,
            ToolKind::LINE,
            ToolKind::SQUARE,
            ToolKind::CIRCLE,
            ToolKind::TRIANGLE,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Fill => "paint",
            ToolKind::Shape(kind) => kind.name(),
        }
    }

    /// Glyph for the tool button
    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Pen => "✏",
            ToolKind::Eraser => "⌫",
            ToolKind::Fill => "▧",
            ToolKind::Shape(ShapeKind::Line) => "╱",
            ToolKind::Shape(ShapeKind::Square) => "□",
            ToolKind::Shape(ShapeKind::Circle) => "○",
            ToolKind::Shape(ShapeKind::Triangle) => "△",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ToolKind::all()
            .iter()
            .copied()
            .find(|tool| tool.name() == name || (name == "fill" && *tool == ToolKind::Fill))
            .ok_or_else(|| PaintError::UnknownTool(s.to_string()))
    }
}
