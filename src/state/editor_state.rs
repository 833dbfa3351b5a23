//! The gesture state machine for the raster editor.
//!
//! A gesture starts on pointer-down and ends on pointer-up. Between
//! gestures the editor is `Idle`; a finished shape can still be edited
//! through its handles, but that is tracked by the live shape in the
//! context rather than by a state here.
//!
//! # State Transitions
//!
//! ```text
//!              down (pen/eraser)       ┌──────────────┐
//!          ┌──────────────────────────►│   Freehand   ├──┐
//!          │                           └──────────────┘  │
//!          │   down (shape tool)       ┌──────────────┐  │
//! ┌──────┐ ├──────────────────────────►│    Shape     ├──┤ up ┌──────┐
//! │ Idle ├─┤                           └──────────────┘  ├───►│ Idle │
//! └──────┘ │   down on canvas handle   ┌──────────────┐  │    └──────┘
//!          └──────────────────────────►│ResizingCanvas├──┘
//!                                      └──────────────┘
//! ```
//!
//! A fill is applied on pointer-down and never leaves `Idle`.
use std::fmt;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::gizmo::CanvasEdge;
use crate::tools::{FreehandStroke, ShapeField};

/// Width and height of the canvas in pixels, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: u32,
    pub height: u32,
}

impl CanvasDimensions {
    /// Zero on either axis is raised to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl fmt::Display for CanvasDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The possible states of the editor between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pen or eraser stroke
    Freehand { stroke: FreehandStroke },
    /// Drawing a new shape (`active` is `None`) or dragging one of the
    /// live shape's handles
    Shape { active: Option<ShapeField> },
    /// Dragging a canvas handle
    ResizingCanvas {
        edge: CanvasEdge,
        /// Size when the drag started, to detect a net no-op
        before: CanvasDimensions,
        /// Handle anchor minus the pointer position at grab time
        grab: Vec2,
    },
}

impl EditorState {
    /// Every gesture can only end by returning to idle, and a new one can
    /// only begin from idle.
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!((self, new_state), (EditorState::Idle, _) | (_, EditorState::Idle))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Freehand { .. } => "freehand",
            EditorState::Shape { .. } => "shape",
            EditorState::ResizingCanvas { .. } => "canvas resize",
        }
    }
}
