use std::cell::RefCell;
use std::rc::Rc;

use egui::Rect;

use crate::config::PaintSettings;
use crate::event::{EditorStatus, LoggingEventHandler, StatusEventHandler};
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::CanvasRenderer;
use crate::state::EditorContext;
use crate::surface::RasterSurface;

const SETTINGS_KEY: &str = "canvas_paint_settings";

/// Widths offered in the tools panel
pub const WIDTH_CHOICES: [f32; 4] = [1.0, 3.0, 5.0, 8.0];

pub struct PaintApp {
    context: EditorContext,
    renderer: CanvasRenderer,
    input: InputHandler,
    status: Rc<RefCell<EditorStatus>>,
    settings: PaintSettings,
    /// A press started on the canvas and has not been released yet
    pointer_captured: bool,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintSettings>(storage, SETTINGS_KEY))
            .filter(|settings| match settings.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("ignoring stored settings: {err}");
                    false
                }
            })
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    /// Builds the app without an eframe creation context. `settings` is
    /// expected to be valid.
    pub fn with_settings(settings: PaintSettings) -> Self {
        let surface = RasterSurface::blank(settings.canvas.initial_dimensions(), settings.canvas.background);
        let context = EditorContext::with_surface(surface, &settings);
        let status = Rc::new(RefCell::new(EditorStatus::new(context.canvas_size(), context.tool())));

        context.event_bus().subscribe(Box::new(LoggingEventHandler));
        context
            .event_bus()
            .subscribe(Box::new(StatusEventHandler::new(status.clone())));
        log::info!("canvas ready at {}", context.canvas_size());

        Self {
            context,
            renderer: CanvasRenderer::new(),
            input: InputHandler::new(),
            status,
            settings,
            pointer_captured: false,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn status(&self) -> EditorStatus {
        *self.status.borrow()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut EditorContext, &mut CanvasRenderer) {
        (&mut self.context, &mut self.renderer)
    }

    /// Feeds this frame's pointer events to the editor. Presses only count
    /// when they start inside `canvas_area` and nothing else covers it.
    pub(crate) fn handle_input(&mut self, ctx: &egui::Context, canvas_area: Rect, canvas_hovered: bool) {
        let context = &self.context;
        let events = self.input.process_input(ctx, |pos| context.target_at(pos));

        for event in events {
            match &event {
                InputEvent::PointerDown { location, .. } => {
                    if !canvas_hovered || !canvas_area.contains(location.position) {
                        continue;
                    }
                    self.pointer_captured = true;
                }
                InputEvent::PointerUp { .. } => {
                    if !self.pointer_captured {
                        continue;
                    }
                    self.pointer_captured = false;
                }
                InputEvent::PointerMove { .. } | InputEvent::PointerLeave { .. } => {}
            }
            self.context.handle_event(&event);
        }
    }

    /// Copies the live tool configuration into what gets persisted.
    fn sync_settings(&mut self) {
        self.settings.tool = *self.context.config();
        let size = self.context.canvas_size();
        self.settings.canvas.width = size.width;
        self.settings.canvas.height = size.height;
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_settings();
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (undo, redo) = ctx.input_mut(|input| {
            // Shift+Z first, since the plain shortcut would also match it
            let redo = input.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || input.consume_key(egui::Modifiers::COMMAND, egui::Key::Y);
            let undo = input.consume_key(egui::Modifiers::COMMAND, egui::Key::Z);
            (undo, redo)
        });
        if redo {
            self.context.redo();
        } else if undo {
            self.context.undo();
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
