use egui::{Color32, Pos2};

use crate::surface::Surface;

/// A pen or eraser stroke in progress.
///
/// Each new point strokes only the segment from the previous point, so
/// drawing never repaints what is already on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandStroke {
    points: Vec<Pos2>,
    /// Line width to put back when the stroke ends (eraser widening)
    restore_width: Option<f32>,
}

impl FreehandStroke {
    /// Starts a stroke and draws its first dot.
    pub fn begin<S: Surface + ?Sized>(
        surface: &mut S,
        pos: Pos2,
        color: Color32,
        width: f32,
        restore_width: Option<f32>,
    ) -> Self {
        surface.set_stroke_color(color);
        surface.set_line_width(width);
        surface.begin_path();
        surface.move_to(pos);
        surface.line_to(pos);
        surface.stroke();

        Self {
            points: vec![pos],
            restore_width,
        }
    }

    /// Extends the stroke to `pos`.
    pub fn extend_to<S: Surface + ?Sized>(&mut self, surface: &mut S, pos: Pos2) {
        let Some(&last) = self.points.last() else {
            return;
        };
        surface.begin_path();
        surface.move_to(last);
        surface.line_to(pos);
        surface.stroke();
        self.points.push(pos);
    }

    /// Ends the stroke, restoring any temporarily widened line width.
    pub fn finish<S: Surface + ?Sized>(self, surface: &mut S) -> Vec<Pos2> {
        if let Some(width) = self.restore_width {
            surface.set_line_width(width);
        }
        self.points
    }
}
