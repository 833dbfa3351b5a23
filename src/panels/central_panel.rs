use crate::PaintApp;

/// Room around the canvas so the edge handles stay grabbable
const CANVAS_MARGIN: f32 = 16.0;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            let size = app.context().canvas_size().as_vec2();
            let (area, response) = ui.allocate_exact_size(
                size + egui::Vec2::splat(2.0 * CANVAS_MARGIN),
                egui::Sense::click_and_drag(),
            );
            let canvas_rect = egui::Rect::from_min_size(area.min + egui::Vec2::splat(CANVAS_MARGIN), size);

            app.context_mut().mapper_mut().set_offset(canvas_rect.min.to_vec2());
            app.handle_input(ctx, area, response.hovered());

            if let Some(pos) = response.hover_pos() {
                if let crate::input::EventTarget::Handle(id) = app.context().target_at(pos) {
                    ctx.set_cursor_icon(id.behavior().cursor_icon());
                }
            }

            // The input above may have resized the canvas.
            let (context, renderer) = app.parts_mut();
            let canvas_rect = egui::Rect::from_min_size(canvas_rect.min, context.canvas_size().as_vec2());
            renderer.sync(ctx, context.surface());

            let painter = ui.painter();
            renderer.render(painter, canvas_rect);
            renderer.render_handles(painter, canvas_rect.min, context.handles());
        });
    });
}
