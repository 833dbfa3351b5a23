use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Outline shapes that can be drawn and edited through handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Square,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

/// Which control point of a shape is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeField {
    Start,
    End,
    Center,
}

impl ShapeField {
    pub const ALL: [ShapeField; 3] = [ShapeField::Start, ShapeField::End, ShapeField::Center];
}

/// Bounding extent of the shape in progress.
///
/// `center` is the midpoint of `start` and `end` after every update; a
/// center update moves both ends by the same delta instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeGeometry {
    pub start: Pos2,
    pub end: Pos2,
    pub center: Pos2,
}

impl ShapeGeometry {
    /// A zero-extent shape anchored at `pos`
    pub fn at(pos: Pos2) -> Self {
        Self {
            start: pos,
            end: pos,
            center: pos,
        }
    }

    pub fn get(&self, field: ShapeField) -> Pos2 {
        match field {
            ShapeField::Start => self.start,
            ShapeField::End => self.end,
            ShapeField::Center => self.center,
        }
    }

    /// Moves one control point to `pos` and re-derives the others.
    pub fn update(&mut self, field: ShapeField, pos: Pos2) {
        match field {
            ShapeField::Center => {
                let delta = pos - midpoint(self.start, self.end);
                self.translate(delta);
                self.center = pos;
            }
            ShapeField::Start => {
                self.start = pos;
                self.center = midpoint(self.start, self.end);
            }
            ShapeField::End => {
                self.end = pos;
                self.center = midpoint(self.start, self.end);
            }
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Degenerate (single point) shapes are not made editable.
    pub fn has_extent(&self) -> bool {
        self.start != self.end
    }

    pub fn size(&self) -> Vec2 {
        self.end - self.start
    }
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Rebuilds the shape's path from its geometry and strokes it.
pub fn trace_shape<S: Surface + ?Sized>(surface: &mut S, kind: ShapeKind, geometry: &ShapeGeometry) {
    let ShapeGeometry { start, end, center } = *geometry;

    surface.begin_path();
    match kind {
        ShapeKind::Line => {
            surface.move_to(start);
            surface.line_to(end);
        }
        ShapeKind::Square => {
            surface.move_to(start);
            surface.line_to(Pos2::new(end.x, start.y));
            surface.line_to(end);
            surface.line_to(Pos2::new(start.x, end.y));
            surface.line_to(start);
            // repeat the first edge so the caps meet at the corner
            surface.line_to(Pos2::new(end.x, start.y));
        }
        ShapeKind::Circle => {
            let radii = Vec2::new((start.x - center.x).abs(), (start.y - center.y).abs());
            surface.ellipse(center, radii);
        }
        ShapeKind::Triangle => {
            let apex = Pos2::new(center.x, start.y);
            let left = Pos2::new(start.x, end.y);
            surface.move_to(apex);
            surface.line_to(left);
            surface.line_to(end);
            surface.line_to(apex);
            surface.line_to(left);
        }
    }
    surface.stroke();
}
