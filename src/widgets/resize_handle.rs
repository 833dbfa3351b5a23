use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

use crate::gizmo::{EditHandle, HandleBehavior, HandleId};

const HANDLE_FILL: Color32 = Color32::from_rgb(30, 120, 255);

impl HandleBehavior {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandleBehavior::Resize => CursorIcon::Crosshair,
            HandleBehavior::Translate => CursorIcon::Move,
            HandleBehavior::ResizeWidth => CursorIcon::ResizeHorizontal,
            HandleBehavior::ResizeHeight => CursorIcon::ResizeVertical,
            HandleBehavior::ResizeBoth => CursorIcon::ResizeNwSe,
        }
    }
}

/// Paints one edit handle. Hit-testing happens in `HandleManager`; this
/// only draws.
pub struct HandleWidget {
    id: HandleId,
    position: Pos2,
    size: f32,
}

impl HandleWidget {
    /// `origin` is the screen position of the canvas's top-left pixel.
    pub fn new(handle: &EditHandle, origin: Pos2, size: f32) -> Self {
        Self {
            id: handle.id(),
            position: origin + handle.position().to_vec2(),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    pub fn paint(&self, painter: &Painter) {
        match self.id {
            // Shape handles are round so they read differently from the
            // canvas edges they may sit on.
            HandleId::Shape(_) => {
                let radius = self.size * 0.5;
                painter.circle_filled(self.position, radius, HANDLE_FILL);
                painter.circle_stroke(self.position, radius, Stroke::new(1.0, Color32::WHITE));
            }
            HandleId::Canvas(_) => {
                let rect = self.rect();
                painter.rect_filled(rect, 1.0, Color32::WHITE);
                painter.rect_stroke(rect, 1.0, Stroke::new(1.0, HANDLE_FILL));
            }
        }
    }
}
