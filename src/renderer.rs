use egui::{Color32, ColorImage, Context, Painter, Rect, Stroke, TextureHandle, TextureOptions};

use crate::gizmo::HandleManager;
use crate::surface::RasterSurface;
use crate::widgets::HandleWidget;

const CHECKER_SIZE: f32 = 8.0;

/// Shows the live raster buffer as an egui texture.
///
/// The texture is only re-uploaded when the surface revision changes, so
/// idle frames cost one textured quad.
#[derive(Default)]
pub struct CanvasRenderer {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads the surface pixels if they changed since the last upload.
    /// Returns true when a new texture was sent to the GPU.
    pub fn sync(&mut self, ctx: &Context, surface: &RasterSurface) -> bool {
        if self.texture.is_some() && self.uploaded_revision == Some(surface.revision()) {
            return false;
        }

        let pixels = surface.pixels();
        let size = [pixels.width() as usize, pixels.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, pixels.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
        }
        self.uploaded_revision = Some(surface.revision());
        log::trace!("uploaded canvas texture at revision {}", surface.revision());
        true
    }

    /// Paints the canvas into `rect`, which must have the canvas size.
    pub fn render(&self, painter: &Painter, rect: Rect) {
        paint_checkerboard(painter, rect);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(90)));
    }

    /// Draws every handle on top of the canvas whose top-left is `origin`.
    pub fn render_handles(&self, painter: &Painter, origin: egui::Pos2, handles: &HandleManager) {
        let size = handles.style().size;
        for handle in handles.handles() {
            HandleWidget::new(handle, origin, size).paint(painter);
        }
    }
}

/// Transparent pixels show through to a light checkerboard.
fn paint_checkerboard(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(250));
    let clip = painter.clip_rect().intersect(rect);
    if !clip.is_positive() {
        return;
    }

    let first_col = ((clip.min.x - rect.min.x) / CHECKER_SIZE).floor().max(0.0) as u32;
    let first_row = ((clip.min.y - rect.min.y) / CHECKER_SIZE).floor().max(0.0) as u32;
    let cols = (rect.width() / CHECKER_SIZE).ceil() as u32;
    let rows = (rect.height() / CHECKER_SIZE).ceil() as u32;
    let last_col = (((clip.max.x - rect.min.x) / CHECKER_SIZE).ceil() as u32).min(cols);
    let last_row = (((clip.max.y - rect.min.y) / CHECKER_SIZE).ceil() as u32).min(rows);

    for row in first_row..last_row {
        for col in first_col..last_col {
            if (row + col) % 2 == 0 {
                continue;
            }
            let min = rect.min + egui::vec2(col as f32, row as f32) * CHECKER_SIZE;
            let cell = Rect::from_min_size(min, egui::Vec2::splat(CHECKER_SIZE)).intersect(rect);
            painter.rect_filled(cell, 0.0, Color32::from_gray(225));
        }
    }
}
