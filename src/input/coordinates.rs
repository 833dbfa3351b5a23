use egui::{Pos2, Vec2};

use crate::state::CanvasDimensions;

/// Converts pointer-device positions into canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateMapper {
    /// Where the canvas origin sits in client coordinates
    offset: Vec2,
}

impl CoordinateMapper {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The host calls this whenever the canvas moves on screen.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Client position to canvas-local position, snapped to whole pixels.
    pub fn to_canvas(&self, client: Pos2) -> Pos2 {
        let local = client - self.offset;
        Pos2::new(local.x.floor(), local.y.floor())
    }

    /// Clamps a canvas-local position into `[0, width) x [0, height)`.
    pub fn clamp(pos: Pos2, dims: CanvasDimensions) -> (u32, u32) {
        let max_x = dims.width.saturating_sub(1) as f32;
        let max_y = dims.height.saturating_sub(1) as f32;
        (pos.x.clamp(0.0, max_x) as u32, pos.y.clamp(0.0, max_y) as u32)
    }
}
