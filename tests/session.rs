use std::cell::RefCell;
use std::rc::Rc;

use canvas_paint::surface::pixels::{get_pixel, to_rgba};
use canvas_paint::{
    CanvasDimensions, CanvasEdge, EditorContext, EditorEvent, EventHandler, EventTarget, HandleId,
    InputEvent, InputLocation, PaintSettings, ShapeField, Surface, ToolKind,
};
use egui::{Color32, PointerButton, Pos2, Vec2};

struct Recorder(Rc<RefCell<Vec<EditorEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

fn settings(width: u32, height: u32, background: Option<Color32>) -> PaintSettings {
    let mut settings = PaintSettings::default();
    settings.canvas.width = width;
    settings.canvas.height = height;
    settings.canvas.background = background;
    settings
}

fn editor(width: u32, height: u32) -> EditorContext {
    EditorContext::new(&settings(width, height, Some(Color32::WHITE))).unwrap()
}

fn record(ctx: &EditorContext) -> Rc<RefCell<Vec<EditorEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    ctx.event_bus().subscribe(Box::new(Recorder(events.clone())));
    events
}

fn drag(ctx: &mut EditorContext, from: Pos2, to: Pos2, target: EventTarget) {
    ctx.pointer_down(from, PointerButton::Primary, target);
    ctx.pointer_move(to, true);
    ctx.pointer_up(to);
}

fn pixel(ctx: &EditorContext, x: u32, y: u32) -> Color32 {
    let rgba = get_pixel(ctx.surface().pixels(), x, y).unwrap();
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

#[test]
fn test_square_then_center_drag() {
    let mut ctx = editor(120, 120);
    ctx.set_tool(ToolKind::SQUARE);

    ctx.pointer_down(Pos2::new(10.0, 10.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_move(Pos2::new(30.0, 30.0), true);
    ctx.pointer_move(Pos2::new(50.0, 50.0), true);
    ctx.pointer_up(Pos2::new(50.0, 50.0));

    assert_eq!(ctx.handles().shape_handles().len(), 3);
    let geometry = ctx.live_shape().unwrap().geometry;
    assert_eq!(geometry.start, Pos2::new(10.0, 10.0));
    assert_eq!(geometry.end, Pos2::new(50.0, 50.0));
    assert_eq!(geometry.center, Pos2::new(30.0, 30.0));
    // The intermediate preview at (30, 30) left no trail
    assert_eq!(pixel(&ctx, 30, 20), Color32::WHITE);

    let center = Pos2::new(30.0, 30.0);
    assert_eq!(
        ctx.target_at(center),
        EventTarget::Handle(HandleId::Shape(ShapeField::Center))
    );
    drag(
        &mut ctx,
        center,
        Pos2::new(60.0, 60.0),
        EventTarget::Handle(HandleId::Shape(ShapeField::Center)),
    );

    let geometry = ctx.live_shape().unwrap().geometry;
    assert_eq!(geometry.start, Pos2::new(40.0, 40.0));
    assert_eq!(geometry.end, Pos2::new(80.0, 80.0));
    assert_eq!(geometry.end - geometry.start, Vec2::splat(40.0));
    assert_eq!(
        ctx.handles().get(HandleId::Shape(ShapeField::Start)).unwrap().position(),
        Pos2::new(40.0, 40.0)
    );

    // Editing through handles never adds history entries
    assert_eq!(ctx.history().undo_len(), 1);
    assert_eq!(pixel(&ctx, 60, 40), Color32::BLACK);
    assert_eq!(pixel(&ctx, 30, 10), Color32::WHITE);
}

#[test]
fn test_end_handle_keeps_center_at_midpoint() {
    let mut ctx = editor(100, 100);
    ctx.set_tool(ToolKind::LINE);
    drag(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(50.0, 30.0), EventTarget::Canvas);

    drag(
        &mut ctx,
        Pos2::new(50.0, 30.0),
        Pos2::new(70.0, 90.0),
        EventTarget::Handle(HandleId::Shape(ShapeField::End)),
    );

    let geometry = ctx.live_shape().unwrap().geometry;
    assert_eq!(geometry.center, Pos2::new(40.0, 50.0));
    assert_eq!(
        ctx.handles().get(HandleId::Shape(ShapeField::Center)).unwrap().position(),
        Pos2::new(40.0, 50.0)
    );
}

#[test]
fn test_degenerate_shape_gets_no_handles() {
    let mut ctx = editor(40, 40);
    ctx.set_tool(ToolKind::CIRCLE);
    let events = record(&ctx);

    ctx.pointer_down(Pos2::new(20.0, 20.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_up(Pos2::new(20.0, 20.0));

    assert!(!ctx.handles().has_shape_handles());
    assert!(ctx.live_shape().is_none());
    assert!(ctx.can_undo());
    assert!(
        !events
            .borrow()
            .iter()
            .any(|event| matches!(event, EditorEvent::ShapeCommitted { .. }))
    );
}

#[test]
fn test_tool_change_deletes_handles() {
    let mut ctx = editor(80, 80);
    ctx.set_tool(ToolKind::TRIANGLE);
    drag(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(60.0, 60.0), EventTarget::Canvas);
    assert!(ctx.handles().has_shape_handles());

    ctx.set_tool(ToolKind::SQUARE);
    assert!(!ctx.handles().has_shape_handles());
    assert!(ctx.live_shape().is_none());
    // Where the end handle was is plain canvas now
    assert_eq!(ctx.target_at(Pos2::new(60.0, 60.0)), EventTarget::Canvas);
}

#[test]
fn test_new_shape_replaces_live_shape() {
    let mut ctx = editor(80, 80);
    ctx.set_tool(ToolKind::SQUARE);
    drag(&mut ctx, Pos2::new(5.0, 5.0), Pos2::new(20.0, 20.0), EventTarget::Canvas);
    drag(&mut ctx, Pos2::new(40.0, 40.0), Pos2::new(70.0, 60.0), EventTarget::Canvas);

    assert_eq!(ctx.history().undo_len(), 2);
    let geometry = ctx.live_shape().unwrap().geometry;
    assert_eq!(geometry.start, Pos2::new(40.0, 40.0));
    // First square is now plain pixels
    assert_eq!(pixel(&ctx, 12, 5), Color32::BLACK);
}

#[test]
fn test_shape_keeps_its_starting_color() {
    let mut ctx = editor(60, 60);
    ctx.set_tool(ToolKind::LINE);
    ctx.set_secondary_color(Color32::RED);

    ctx.pointer_down(Pos2::new(10.0, 30.0), PointerButton::Secondary, EventTarget::Canvas);
    ctx.pointer_move(Pos2::new(40.0, 30.0), true);
    ctx.pointer_up(Pos2::new(40.0, 30.0));

    drag(
        &mut ctx,
        Pos2::new(40.0, 30.0),
        Pos2::new(50.0, 30.0),
        EventTarget::Handle(HandleId::Shape(ShapeField::End)),
    );
    assert_eq!(pixel(&ctx, 45, 30), Color32::RED);
}

#[test]
fn test_canvas_resize_is_undoable() {
    let mut ctx = editor(100, 80);
    let events = record(&ctx);
    ctx.set_tool(ToolKind::Pen);
    drag(&mut ctx, Pos2::new(5.0, 5.0), Pos2::new(20.0, 5.0), EventTarget::Canvas);

    let right = EventTarget::Handle(HandleId::Canvas(CanvasEdge::Right));
    ctx.pointer_down(Pos2::new(100.0, 40.0), PointerButton::Primary, right);
    ctx.pointer_move(Pos2::new(130.0, 40.0), true);
    ctx.pointer_move(Pos2::new(150.0, 40.0), true);
    ctx.pointer_up(Pos2::new(150.0, 40.0));

    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(150, 80));
    assert_eq!(ctx.history().undo_len(), 2);
    // Content survives the resize and the new strip is blank
    assert_eq!(pixel(&ctx, 10, 5), Color32::BLACK);
    assert_eq!(pixel(&ctx, 140, 5), Color32::TRANSPARENT);
    // Baseline stroke state is back after the resize reset it
    assert_eq!(ctx.surface().line_width(), 1.0);
    assert_eq!(
        ctx.handles().get(HandleId::Canvas(CanvasEdge::Corner)).unwrap().position(),
        Pos2::new(150.0, 80.0)
    );
    assert!(
        events
            .borrow()
            .contains(&EditorEvent::CanvasResized { width: 150, height: 80 })
    );

    assert!(ctx.undo());
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(100, 80));
    assert_eq!(pixel(&ctx, 10, 5), Color32::BLACK);
    assert!(ctx.redo());
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(150, 80));
}

#[test]
fn test_canvas_resize_that_nets_zero_is_discarded() {
    let mut ctx = editor(100, 80);
    let bottom = EventTarget::Handle(HandleId::Canvas(CanvasEdge::Bottom));

    ctx.pointer_down(Pos2::new(50.0, 80.0), PointerButton::Primary, bottom);
    ctx.pointer_move(Pos2::new(50.0, 120.0), true);
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(100, 120));
    ctx.pointer_move(Pos2::new(50.0, 80.0), true);
    ctx.pointer_up(Pos2::new(50.0, 80.0));

    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(100, 80));
    assert!(!ctx.can_undo());
    assert!(ctx.surface().pixels().pixels().all(|p| *p == to_rgba(Color32::WHITE)));
}

#[test]
fn test_discarded_resize_keeps_oldest_step_at_max_depth() {
    let mut settings = settings(100, 80, Some(Color32::WHITE));
    settings.history.max_depth = Some(2);
    let mut ctx = EditorContext::new(&settings).unwrap();
    let blank = ctx.surface().image_data();

    drag(&mut ctx, Pos2::new(5.0, 5.0), Pos2::new(20.0, 5.0), EventTarget::Canvas);
    drag(&mut ctx, Pos2::new(5.0, 30.0), Pos2::new(20.0, 30.0), EventTarget::Canvas);
    assert_eq!(ctx.history().undo_len(), 2);

    // Press and release on the handle without moving
    let right = EventTarget::Handle(HandleId::Canvas(CanvasEdge::Right));
    ctx.pointer_down(Pos2::new(100.0, 40.0), PointerButton::Primary, right);
    ctx.pointer_up(Pos2::new(100.0, 40.0));

    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(100, 80));
    assert_eq!(ctx.history().undo_len(), 2);
    assert!(ctx.undo());
    assert!(ctx.undo());
    assert_eq!(ctx.surface().image_data(), blank);
}

#[test]
fn test_canvas_resize_clamps_to_minimum() {
    let mut ctx = editor(50, 50);
    let corner = EventTarget::Handle(HandleId::Canvas(CanvasEdge::Corner));
    drag(&mut ctx, Pos2::new(50.0, 50.0), Pos2::new(-30.0, -10.0), corner);
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(1, 1));
}

#[test]
fn test_programmatic_resize() {
    let mut ctx = editor(50, 40);
    assert!(!ctx.resize_canvas(50, 40));
    assert!(ctx.resize_canvas(0, 100_000));
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(1, 8192));
    assert!(ctx.undo());
    assert_eq!(ctx.canvas_size(), CanvasDimensions::new(50, 40));
}

#[test]
fn test_eraser_widens_then_restores() {
    let mut settings = settings(60, 60, Some(Color32::BLACK));
    settings.tool.width = 3.0;
    let mut ctx = EditorContext::new(&settings).unwrap();
    ctx.set_tool(ToolKind::Eraser);

    ctx.pointer_down(Pos2::new(10.0, 10.0), PointerButton::Primary, EventTarget::Canvas);
    assert_eq!(ctx.surface().line_width(), 13.0);
    ctx.pointer_move(Pos2::new(30.0, 10.0), true);
    ctx.pointer_up(Pos2::new(30.0, 10.0));

    assert_eq!(ctx.surface().line_width(), 3.0);
    assert_eq!(pixel(&ctx, 20, 15), Color32::WHITE);
    assert_eq!(pixel(&ctx, 20, 30), Color32::BLACK);
}

#[test]
fn test_pointer_down_without_up_finishes_previous_gesture() {
    let mut ctx = editor(60, 60);
    ctx.pointer_down(Pos2::new(5.0, 5.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_move(Pos2::new(25.0, 5.0), true);
    // pointer-up lost
    ctx.pointer_down(Pos2::new(5.0, 40.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_move(Pos2::new(25.0, 40.0), true);
    ctx.pointer_up(Pos2::new(25.0, 40.0));

    assert_eq!(ctx.history().undo_len(), 2);
    assert!(ctx.state().is_idle());
    // The second stroke did not connect to the first
    assert_eq!(pixel(&ctx, 15, 20), Color32::WHITE);

    ctx.undo();
    assert_eq!(pixel(&ctx, 15, 5), Color32::BLACK);
    assert_eq!(pixel(&ctx, 15, 40), Color32::WHITE);
}

#[test]
fn test_lost_pointer_up_after_shape_still_creates_handles() {
    let mut ctx = editor(60, 60);
    ctx.set_tool(ToolKind::SQUARE);
    ctx.pointer_down(Pos2::new(5.0, 5.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_move(Pos2::new(30.0, 30.0), true);

    let end = ctx.target_at(Pos2::new(30.0, 30.0));
    assert_eq!(end, EventTarget::Canvas);
    ctx.finish_gesture();
    assert!(ctx.handles().has_shape_handles());
    assert_eq!(
        ctx.target_at(Pos2::new(30.0, 30.0)),
        EventTarget::Handle(HandleId::Shape(ShapeField::End))
    );
}

#[test]
fn test_fill_on_same_color_does_not_commit() {
    let mut ctx = editor(10, 10);
    let events = record(&ctx);
    ctx.set_tool(ToolKind::Fill);

    ctx.pointer_down(Pos2::new(3.0, 3.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_up(Pos2::new(3.0, 3.0));
    assert_eq!(ctx.history().undo_len(), 1);
    assert_eq!(pixel(&ctx, 9, 9), Color32::BLACK);

    let revision = ctx.surface().revision();
    ctx.pointer_down(Pos2::new(6.0, 6.0), PointerButton::Primary, EventTarget::Canvas);
    ctx.pointer_up(Pos2::new(6.0, 6.0));
    assert_eq!(ctx.history().undo_len(), 1);
    assert_eq!(ctx.surface().revision(), revision);

    let fills: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::FillApplied { filled } => Some(*filled),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![100]);
}

#[test]
fn test_fill_seed_outside_canvas_is_clamped() {
    let mut ctx = editor(10, 10);
    ctx.set_tool(ToolKind::Fill);
    ctx.pointer_down(Pos2::new(25.0, -4.0), PointerButton::Secondary, EventTarget::Canvas);
    // Secondary is white on a white canvas: nothing to do
    assert!(!ctx.can_undo());

    ctx.pointer_down(Pos2::new(25.0, -4.0), PointerButton::Primary, EventTarget::Canvas);
    assert!(ctx.can_undo());
    assert_eq!(pixel(&ctx, 9, 0), Color32::BLACK);
}

#[test]
fn test_history_events_follow_commits() {
    let mut ctx = editor(30, 30);
    let events = record(&ctx);

    drag(&mut ctx, Pos2::new(1.0, 1.0), Pos2::new(9.0, 9.0), EventTarget::Canvas);
    ctx.undo();

    let history: Vec<_> = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, EditorEvent::HistoryChanged { .. }))
        .cloned()
        .collect();
    assert_eq!(
        history,
        vec![
            EditorEvent::HistoryChanged {
                can_undo: true,
                can_redo: false
            },
            EditorEvent::HistoryChanged {
                can_undo: false,
                can_redo: true
            },
        ]
    );
}

#[test]
fn test_input_events_are_mapped_from_client_space() {
    let mut ctx = editor(40, 40);
    ctx.mapper_mut().set_offset(Vec2::new(100.0, 200.0));

    let down = Pos2::new(105.4, 210.9);
    ctx.handle_event(&InputEvent::PointerDown {
        location: InputLocation {
            position: down,
            target: ctx.target_at(down),
        },
        button: PointerButton::Primary,
    });
    ctx.handle_event(&InputEvent::PointerMove {
        location: InputLocation::on_canvas(Pos2::new(120.0, 210.0)),
        held_buttons: vec![PointerButton::Primary],
    });
    ctx.handle_event(&InputEvent::PointerUp {
        location: InputLocation::on_canvas(Pos2::new(120.0, 210.0)),
        button: PointerButton::Primary,
    });

    assert_eq!(ctx.cursor(), Some(Pos2::new(20.0, 10.0)));
    assert_eq!(pixel(&ctx, 12, 10), Color32::BLACK);
    assert_eq!(ctx.history().undo_len(), 1);

    let corner = Pos2::new(140.0, 240.0);
    assert_eq!(
        ctx.target_at(corner),
        EventTarget::Handle(HandleId::Canvas(CanvasEdge::Corner))
    );
}
