use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::state::CanvasDimensions;
use crate::tools::{ShapeField, ShapeGeometry};

const DEFAULT_HANDLE_SIZE: f32 = 8.0;

/// Canvas resize handles, one per draggable edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasEdge {
    Right,
    Bottom,
    Corner,
}

impl CanvasEdge {
    pub const ALL: [CanvasEdge; 3] = [CanvasEdge::Right, CanvasEdge::Bottom, CanvasEdge::Corner];

    pub fn resizes_width(&self) -> bool {
        matches!(self, CanvasEdge::Right | CanvasEdge::Corner)
    }

    pub fn resizes_height(&self) -> bool {
        matches!(self, CanvasEdge::Bottom | CanvasEdge::Corner)
    }

    /// Right-mid, bottom-mid and bottom-right corner of the canvas
    pub fn anchor(&self, dims: CanvasDimensions) -> Pos2 {
        let w = dims.width as f32;
        let h = dims.height as f32;
        match self {
            CanvasEdge::Right => Pos2::new(w, h / 2.0),
            CanvasEdge::Bottom => Pos2::new(w / 2.0, h),
            CanvasEdge::Corner => Pos2::new(w, h),
        }
    }
}

/// Identity of an on-canvas handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleId {
    Shape(ShapeField),
    Canvas(CanvasEdge),
}

/// What dragging a handle does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleBehavior {
    /// Moves one end of a shape
    Resize,
    /// Moves the whole shape
    Translate,
    ResizeWidth,
    ResizeHeight,
    ResizeBoth,
}

impl HandleId {
    pub fn behavior(&self) -> HandleBehavior {
        match self {
            HandleId::Shape(ShapeField::Start | ShapeField::End) => HandleBehavior::Resize,
            HandleId::Shape(ShapeField::Center) => HandleBehavior::Translate,
            HandleId::Canvas(CanvasEdge::Right) => HandleBehavior::ResizeWidth,
            HandleId::Canvas(CanvasEdge::Bottom) => HandleBehavior::ResizeHeight,
            HandleId::Canvas(CanvasEdge::Corner) => HandleBehavior::ResizeBoth,
        }
    }
}

/// Visual parameters shared by every handle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleStyle {
    /// Side length of the square hit area, in canvas pixels
    pub size: f32,
    /// Added to the anchor point when placing a handle
    pub offset: Vec2,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_HANDLE_SIZE,
            offset: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditHandle {
    id: HandleId,
    position: Pos2,
}

impl EditHandle {
    fn new(id: HandleId, anchor: Pos2, style: &HandleStyle) -> Self {
        Self {
            id,
            position: anchor + style.offset,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn behavior(&self) -> HandleBehavior {
        self.id.behavior()
    }

    /// Canvas-local position (anchor plus the style offset)
    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn rect(&self, size: f32) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(size))
    }
}

/// Owns the live handles and keeps them in sync with the geometry they
/// edit. Shape handles come and go with each shape; the three canvas
/// handles live for the whole session and are only repositioned.
#[derive(Debug, Clone)]
pub struct HandleManager {
    style: HandleStyle,
    shape_handles: Vec<EditHandle>,
    canvas_handles: [EditHandle; 3],
}

impl HandleManager {
    pub fn new(style: HandleStyle, dims: CanvasDimensions) -> Self {
        let canvas_handles =
            CanvasEdge::ALL.map(|edge| EditHandle::new(HandleId::Canvas(edge), edge.anchor(dims), &style));
        Self {
            style,
            shape_handles: Vec::new(),
            canvas_handles,
        }
    }

    pub fn style(&self) -> &HandleStyle {
        &self.style
    }

    /// Two resize handles at the ends and a move handle at the center.
    pub fn create_handles(&mut self, geometry: &ShapeGeometry) {
        self.shape_handles = ShapeField::ALL
            .iter()
            .map(|field| EditHandle::new(HandleId::Shape(*field), geometry.get(*field), &self.style))
            .collect();
    }

    /// Removes every shape handle; safe to call when there are none.
    pub fn delete_handles(&mut self) {
        self.shape_handles.clear();
    }

    pub fn move_handles(&mut self, geometry: &ShapeGeometry) {
        for handle in &mut self.shape_handles {
            if let HandleId::Shape(field) = handle.id {
                handle.position = geometry.get(field) + self.style.offset;
            }
        }
    }

    pub fn move_canvas_handles(&mut self, dims: CanvasDimensions) {
        for handle in &mut self.canvas_handles {
            if let HandleId::Canvas(edge) = handle.id {
                handle.position = edge.anchor(dims) + self.style.offset;
            }
        }
    }

    pub fn has_shape_handles(&self) -> bool {
        !self.shape_handles.is_empty()
    }

    pub fn shape_handles(&self) -> &[EditHandle] {
        &self.shape_handles
    }

    pub fn canvas_handles(&self) -> &[EditHandle] {
        &self.canvas_handles
    }

    pub fn handles(&self) -> impl Iterator<Item = &EditHandle> {
        self.shape_handles.iter().chain(self.canvas_handles.iter())
    }

    pub fn get(&self, id: HandleId) -> Option<&EditHandle> {
        self.handles().find(|handle| handle.id == id)
    }

    /// Topmost handle under a canvas-local position. Shape handles sit above
    /// the canvas handles.
    pub fn handle_at(&self, pos: Pos2) -> Option<HandleId> {
        self.handles()
            .find(|handle| handle.rect(self.style.size).contains(pos))
            .map(EditHandle::id)
    }
}
