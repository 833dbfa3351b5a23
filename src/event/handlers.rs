use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{EditorEvent, EventHandler};
use crate::state::CanvasDimensions;
use crate::tools::ToolKind;

/// Logs every event; cursor motion goes to trace to keep debug output readable.
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::CursorMoved { .. } => log::trace!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }
}

/// What the tools panel shows: undo/redo availability, size and cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub size: CanvasDimensions,
    pub cursor: Option<(i32, i32)>,
    pub tool: ToolKind,
}

impl EditorStatus {
    pub fn new(size: CanvasDimensions, tool: ToolKind) -> Self {
        Self {
            can_undo: false,
            can_redo: false,
            size,
            cursor: None,
            tool,
        }
    }
}

/// Mirrors editor events into a shared `EditorStatus`
#[derive(Debug)]
pub struct StatusEventHandler {
    status: Rc<RefCell<EditorStatus>>,
}

impl StatusEventHandler {
    pub fn new(status: Rc<RefCell<EditorStatus>>) -> Self {
        Self { status }
    }
}

impl EventHandler for StatusEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        let mut status = self.status.borrow_mut();
        match *event {
            EditorEvent::HistoryChanged { can_undo, can_redo } => {
                status.can_undo = can_undo;
                status.can_redo = can_redo;
            }
            EditorEvent::CanvasResized { width, height } => {
                status.size = CanvasDimensions::new(width, height);
            }
            EditorEvent::ToolChanged { new, .. } => status.tool = new,
            EditorEvent::CursorMoved { x, y } => status.cursor = Some((x, y)),
            EditorEvent::ShapeCommitted { .. } | EditorEvent::FillApplied { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tracks_events() {
        let status = Rc::new(RefCell::new(EditorStatus::new(
            CanvasDimensions::new(700, 400),
            ToolKind::Pen,
        )));
        let mut handler = StatusEventHandler::new(status.clone());

        handler.handle_event(&EditorEvent::HistoryChanged {
            can_undo: true,
            can_redo: false,
        });
        handler.handle_event(&EditorEvent::CanvasResized { width: 50, height: 60 });
        handler.handle_event(&EditorEvent::ToolChanged {
            old: ToolKind::Pen,
            new: ToolKind::Fill,
        });
        handler.handle_event(&EditorEvent::CursorMoved { x: 4, y: -1 });

        let status = status.borrow();
        assert!(status.can_undo);
        assert!(!status.can_redo);
        assert_eq!(status.size, CanvasDimensions::new(50, 60));
        assert_eq!(status.tool, ToolKind::Fill);
        assert_eq!(status.cursor, Some((4, -1)));
    }
}
