//! The drawing session controller.
//!
//! `EditorContext` owns the surface, the raster history, the handles and
//! the gesture state, and turns pointer events into edits. Every
//! destructive gesture commits exactly once when it starts; previews of
//! shapes and canvas resizes are always drawn on top of a fresh
//! `preview_restore`, so the surface never shows a stale preview frame.
//!
//! # Example
//!
//! ```rust,no_run
//! use canvas_paint::{EditorContext, PaintSettings, ToolKind};
//! use egui::{PointerButton, Pos2};
//!
//! let mut context = EditorContext::new(&PaintSettings::default()).unwrap();
//! context.set_tool(ToolKind::SQUARE);
//! context.pointer_down(Pos2::new(10.0, 10.0), PointerButton::Primary, Default::default());
//! context.pointer_move(Pos2::new(50.0, 50.0), true);
//! context.pointer_up(Pos2::new(50.0, 50.0));
//! assert!(context.handles().has_shape_handles());
//! ```
use egui::{Color32, PointerButton, Pos2, Vec2};

use super::{CanvasDimensions, EditorState};
use crate::command::RasterHistory;
use crate::config::{CanvasSettings, PaintSettings, ToolConfig};
use crate::error::PaintResult;
use crate::event::{EditorEvent, EventBus};
use crate::gizmo::{CanvasEdge, HandleId, HandleManager};
use crate::input::{CoordinateMapper, EventTarget, InputEvent};
use crate::surface::pixels::to_rgba;
use crate::surface::{LineCap, RasterSurface, Surface};
use crate::tools::{
    ERASER_EXTRA_WIDTH, FreehandStroke, ShapeField, ShapeGeometry, ShapeKind, ToolKind, fill_surface,
    fill_would_change, trace_shape,
};

/// The most recent shape, kept editable while its handles exist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveShape {
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    /// Color picked when the shape was started
    pub color: Color32,
}

#[derive(Debug)]
pub struct EditorContext<S: Surface = RasterSurface> {
    surface: S,
    history: RasterHistory,
    handles: HandleManager,
    mapper: CoordinateMapper,
    config: ToolConfig,
    canvas: CanvasSettings,
    state: EditorState,
    live_shape: Option<LiveShape>,
    cursor: Option<Pos2>,
    event_bus: EventBus,
}

impl EditorContext<RasterSurface> {
    /// Creates a context with a software surface sized from the settings.
    pub fn new(settings: &PaintSettings) -> PaintResult<Self> {
        settings.validate()?;
        let surface = RasterSurface::blank(settings.canvas.initial_dimensions(), settings.canvas.background);
        Ok(Self::with_surface(surface, settings))
    }
}

impl<S: Surface> EditorContext<S> {
    pub fn with_surface(surface: S, settings: &PaintSettings) -> Self {
        let dims = CanvasDimensions::new(surface.width(), surface.height());
        let mut context = Self {
            surface,
            history: RasterHistory::with_max_depth(settings.history.max_depth),
            handles: HandleManager::new(settings.handles, dims),
            mapper: CoordinateMapper::default(),
            config: settings.tool,
            canvas: settings.canvas,
            state: EditorState::Idle,
            live_shape: None,
            cursor: None,
            event_bus: EventBus::new(),
        };
        context.apply_baseline();
        context
    }

    /// Dispatches one pointer event, translating its client position into
    /// canvas space first.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let location = event.location();
        let pos = self.mapper.to_canvas(location.position);
        match event {
            InputEvent::PointerDown { button, .. } => self.pointer_down(pos, *button, location.target),
            InputEvent::PointerMove { .. } => self.pointer_move(pos, event.is_drag()),
            InputEvent::PointerUp { .. } => self.pointer_up(pos),
            InputEvent::PointerLeave { .. } => {
                // A drag that leaves the window keeps its last preview; the
                // next pointer-down finishes it.
                log::trace!("pointer left the canvas during {}", self.state.name());
            }
        }
    }

    /// Pointer pressed at a canvas-local position.
    pub fn pointer_down(&mut self, pos: Pos2, button: PointerButton, target: EventTarget) {
        if !self.state.is_idle() {
            log::debug!("pointer-down during {} gesture, finishing it first", self.state.name());
            self.pointer_up(pos);
        }
        self.set_cursor(pos);

        match target {
            EventTarget::Handle(HandleId::Canvas(edge)) => self.begin_canvas_resize(edge, pos),
            EventTarget::Handle(HandleId::Shape(field)) if self.live_shape.is_some() => {
                self.begin_shape_edit(field, pos)
            }
            _ => {
                let color = self.button_color(button);
                match self.config.tool {
                    ToolKind::Pen => self.begin_freehand(pos, color, self.config.width, None),
                    ToolKind::Eraser => self.begin_freehand(
                        pos,
                        self.config.secondary,
                        self.config.width + ERASER_EXTRA_WIDTH,
                        Some(self.config.width),
                    ),
                    ToolKind::Fill => self.fill_at(pos, color),
                    ToolKind::Shape(kind) => self.begin_shape(kind, pos, color),
                }
            }
        }
    }

    /// Pointer moved; `held` says whether any button is down.
    pub fn pointer_move(&mut self, pos: Pos2, held: bool) {
        self.set_cursor(pos);
        if !held {
            return;
        }

        match &mut self.state {
            EditorState::Idle => {}
            EditorState::Freehand { stroke } => {
                stroke.extend_to(&mut self.surface, pos);
                log::trace!("freehand extended to {pos:?}");
            }
            EditorState::Shape { active } => {
                let field = active.unwrap_or(ShapeField::End);
                let track_handles = active.is_some();
                self.update_live_shape(field, pos, track_handles);
            }
            EditorState::ResizingCanvas { edge, grab, .. } => {
                let (edge, grab) = (*edge, *grab);
                self.resize_to_pointer(edge, pos, grab);
            }
        }
    }

    /// Pointer released; ends the current gesture.
    pub fn pointer_up(&mut self, pos: Pos2) {
        self.set_cursor(pos);

        match std::mem::take(&mut self.state) {
            EditorState::Idle => {}
            EditorState::Freehand { stroke } => {
                let points = stroke.finish(&mut self.surface);
                log::debug!("freehand stroke finished with {} points", points.len());
            }
            EditorState::Shape { active: Some(field) } => {
                log::debug!("finished dragging {field:?} handle");
            }
            EditorState::Shape { active: None } => self.finish_shape(),
            EditorState::ResizingCanvas { edge, before, grab } => {
                self.resize_to_pointer(edge, pos, grab);
                self.finish_canvas_resize(before);
            }
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        let old = self.config.tool;
        if old == tool {
            return;
        }
        self.config.tool = tool;
        self.forget_live_shape();
        log::info!("tool changed from {old} to {tool}");
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: tool });
    }

    /// Changes the stroke width. A shape that still has handles is redrawn
    /// with the new width.
    pub fn set_width(&mut self, width: f32) {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("ignoring invalid stroke width {width}");
            return;
        }
        self.config.width = width;
        self.surface.set_line_width(width);

        if self.state.is_idle() && self.handles.has_shape_handles() {
            if let Some(shape) = self.live_shape {
                self.history.preview_restore(&mut self.surface);
                self.render_shape(&shape);
            }
        }
    }

    pub fn set_primary_color(&mut self, color: Color32) {
        self.config.primary = color;
    }

    pub fn set_secondary_color(&mut self, color: Color32) {
        self.config.secondary = color;
    }

    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&mut self.surface);
        if restored {
            self.after_restore();
        }
        restored
    }

    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo(&mut self.surface);
        if restored {
            self.after_restore();
        }
        restored
    }

    /// Resizes the canvas as a completed, undoable resize. Returns false
    /// when the clamped size equals the current one.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> bool {
        let before = self.canvas_size();
        let dims = self.canvas.clamp(width as f32, height as f32);
        if dims == before {
            return false;
        }
        self.finish_gesture();
        self.forget_live_shape();
        self.history.commit(&self.surface);
        self.apply_dimensions(dims);
        self.apply_baseline();
        log::info!("canvas resized from {before} to {dims}");
        self.emit_history();
        true
    }

    /// Ends any gesture in progress as if the pointer had been released
    /// where it was last seen.
    pub fn finish_gesture(&mut self) {
        if !self.state.is_idle() {
            let pos = self.cursor.unwrap_or(Pos2::ZERO);
            self.pointer_up(pos);
        }
    }

    /// What a client-space position would hit: a handle or the canvas.
    pub fn target_at(&self, client: Pos2) -> EventTarget {
        let canvas = client - self.mapper.offset();
        match self.handles.handle_at(canvas) {
            Some(HandleId::Shape(_)) if self.live_shape.is_none() => EventTarget::Canvas,
            Some(id) => EventTarget::Handle(id),
            None => EventTarget::Canvas,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn canvas_size(&self) -> CanvasDimensions {
        CanvasDimensions::new(self.surface.width(), self.surface.height())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn history(&self) -> &RasterHistory {
        &self.history
    }

    pub fn handles(&self) -> &HandleManager {
        &self.handles
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.config.tool
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn live_shape(&self) -> Option<&LiveShape> {
        self.live_shape.as_ref()
    }

    /// Last canvas-local pointer position
    pub fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut CoordinateMapper {
        &mut self.mapper
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    fn transition_to(&mut self, new_state: EditorState) {
        debug_assert!(self.state.can_transition_to(&new_state));
        log::debug!("{} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
    }

    fn button_color(&self, button: PointerButton) -> Color32 {
        match button {
            PointerButton::Secondary => self.config.secondary,
            _ => self.config.primary,
        }
    }

    fn begin_freehand(&mut self, pos: Pos2, color: Color32, width: f32, restore_width: Option<f32>) {
        self.forget_live_shape();
        self.commit();
        let stroke = FreehandStroke::begin(&mut self.surface, pos, color, width, restore_width);
        self.transition_to(EditorState::Freehand { stroke });
    }

    fn fill_at(&mut self, pos: Pos2, color: Color32) {
        self.forget_live_shape();
        let (x, y) = CoordinateMapper::clamp(pos, self.canvas_size());
        let fill_color = to_rgba(color);

        if !fill_would_change(&self.surface.image_data(), x, y, fill_color) {
            log::debug!("fill at ({x}, {y}) would not change anything");
            return;
        }

        self.commit();
        let filled = fill_surface(&mut self.surface, x, y, fill_color);
        log::debug!("filled {filled} pixels from ({x}, {y})");
        self.event_bus.emit(EditorEvent::FillApplied { filled });
    }

    fn begin_shape(&mut self, kind: ShapeKind, pos: Pos2, color: Color32) {
        self.forget_live_shape();
        self.commit();
        let shape = LiveShape {
            kind,
            geometry: ShapeGeometry::at(pos),
            color,
        };
        self.render_shape(&shape);
        self.live_shape = Some(shape);
        self.transition_to(EditorState::Shape { active: None });
    }

    fn begin_shape_edit(&mut self, field: ShapeField, pos: Pos2) {
        self.transition_to(EditorState::Shape { active: Some(field) });
        self.update_live_shape(field, pos, true);
    }

    fn update_live_shape(&mut self, field: ShapeField, pos: Pos2, track_handles: bool) {
        let Some(shape) = self.live_shape.as_mut() else {
            return;
        };
        shape.geometry.update(field, pos);
        let shape = *shape;

        self.history.preview_restore(&mut self.surface);
        self.render_shape(&shape);
        if track_handles {
            self.handles.move_handles(&shape.geometry);
        }
        log::trace!("{} {field:?} moved to {pos:?}", shape.kind.name());
    }

    fn finish_shape(&mut self) {
        let Some(shape) = self.live_shape else {
            return;
        };
        if shape.geometry.has_extent() {
            self.handles.create_handles(&shape.geometry);
            log::debug!("{} committed with handles", shape.kind.name());
            self.event_bus.emit(EditorEvent::ShapeCommitted { kind: shape.kind });
        } else {
            log::debug!("degenerate {} left without handles", shape.kind.name());
            self.live_shape = None;
        }
    }

    fn render_shape(&mut self, shape: &LiveShape) {
        self.surface.set_stroke_color(shape.color);
        self.surface.set_line_width(self.config.width);
        trace_shape(&mut self.surface, shape.kind, &shape.geometry);
    }

    fn begin_canvas_resize(&mut self, edge: CanvasEdge, pos: Pos2) {
        // A resize commits the live shape; editing it afterwards would
        // restore onto the resize snapshot.
        self.forget_live_shape();
        self.commit();
        let before = self.canvas_size();
        let grab = edge.anchor(before) - pos;
        self.transition_to(EditorState::ResizingCanvas { edge, before, grab });
    }

    fn resize_to_pointer(&mut self, edge: CanvasEdge, pos: Pos2, grab: Vec2) {
        let current = self.canvas_size();
        let target = pos + grab;
        let width = if edge.resizes_width() {
            target.x
        } else {
            current.width as f32
        };
        let height = if edge.resizes_height() {
            target.y
        } else {
            current.height as f32
        };
        let dims = self.canvas.clamp(width, height);
        self.apply_dimensions(dims);
        log::trace!("canvas resize preview {dims}");
    }

    fn finish_canvas_resize(&mut self, before: CanvasDimensions) {
        let after = self.canvas_size();
        if after == before {
            self.history.discard_pending_commit();
            log::debug!("canvas resize netted no change, commit discarded");
        } else {
            log::info!("canvas resized from {before} to {after}");
        }
        self.apply_baseline();
        self.emit_history();
    }

    /// Sets the surface size, tracks the canvas handles and puts the
    /// committed pixels back over the cleared buffer.
    fn apply_dimensions(&mut self, dims: CanvasDimensions) {
        let before = self.canvas_size();
        self.surface.set_size(dims.width, dims.height);
        self.handles.move_canvas_handles(dims);
        self.history.preview_restore(&mut self.surface);
        if dims != before {
            self.event_bus.emit(EditorEvent::CanvasResized {
                width: dims.width,
                height: dims.height,
            });
        }
    }

    fn after_restore(&mut self) {
        self.state = EditorState::Idle;
        self.forget_live_shape();
        let dims = self.canvas_size();
        self.handles.move_canvas_handles(dims);
        self.apply_baseline();
        self.event_bus.emit(EditorEvent::CanvasResized {
            width: dims.width,
            height: dims.height,
        });
        self.emit_history();
    }

    /// Line cap and width the surface should always carry between gestures
    fn apply_baseline(&mut self) {
        self.surface.set_line_cap(LineCap::Round);
        self.surface.set_line_width(self.config.width);
    }

    fn forget_live_shape(&mut self) {
        self.handles.delete_handles();
        self.live_shape = None;
    }

    fn commit(&mut self) {
        self.history.commit(&self.surface);
        self.emit_history();
    }

    fn emit_history(&self) {
        self.event_bus.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    fn set_cursor(&mut self, pos: Pos2) {
        if self.cursor == Some(pos) {
            return;
        }
        self.cursor = Some(pos);
        self.event_bus.emit(EditorEvent::CursorMoved {
            x: pos.x as i32,
            y: pos.y as i32,
        });
    }
}
