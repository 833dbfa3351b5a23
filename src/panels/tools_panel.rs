use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::app::WIDTH_CHOICES;
use crate::components::ToolButton;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.context().tool();
            ui.horizontal_wrapped(|ui| {
                for &tool in ToolKind::all() {
                    if ToolButton::new(tool, tool == active_tool).show(ui).clicked() {
                        log::info!("Tool selected from UI: {tool}");
                        app.context_mut().set_tool(tool);
                    }
                }
            });
            ui.separator();

            ui.label("Width");
            let width = app.context().config().width;
            ui.horizontal(|ui| {
                for choice in WIDTH_CHOICES {
                    if ui.selectable_label(width == choice, format!("{choice}")).clicked() {
                        app.context_mut().set_width(choice);
                    }
                }
            });
            ui.separator();

            let config = *app.context().config();
            let mut primary = config.primary;
            let mut secondary = config.secondary;
            ui.horizontal(|ui| {
                ui.label("Primary:");
                if color_edit_button_srgba(ui, &mut primary, Alpha::Opaque).changed() {
                    app.context_mut().set_primary_color(primary);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Secondary:");
                if color_edit_button_srgba(ui, &mut secondary, Alpha::Opaque).changed() {
                    app.context_mut().set_secondary_color(secondary);
                }
            });
            ui.separator();

            // Undo/Redo section
            let status = app.status();
            ui.horizontal(|ui| {
                if ui.add_enabled(status.can_undo, egui::Button::new("Undo")).clicked() {
                    app.context_mut().undo();
                }
                if ui.add_enabled(status.can_redo, egui::Button::new("Redo")).clicked() {
                    app.context_mut().redo();
                }
            });

            let history = app.context().history();
            ui.label(format!(
                "History: {} undo / {} redo ({:.1} MiB)",
                history.undo_len(),
                history.redo_len(),
                history.memory_bytes() as f64 / (1024.0 * 1024.0)
            ));
            ui.separator();

            ui.label(format!("Canvas: {} px", status.size));
            match status.cursor {
                Some((x, y)) => ui.label(format!("Cursor: {x}, {y}")),
                None => ui.label("Cursor: -"),
            };
        });
}
