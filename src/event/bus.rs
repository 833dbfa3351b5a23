use std::cell::RefCell;

use crate::event::{EditorEvent, EventHandler};

/// Broadcasts editor events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers `event` to every handler. Handlers must not emit on the
    /// same bus from inside `handle_event`.
    pub fn emit(&self, event: EditorEvent) {
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            log::warn!("dropping {event:?} emitted from inside a handler");
            return;
        };
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Recorder(Rc<RefCell<Vec<EditorEvent>>>);

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &EditorEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_events_reach_every_handler_in_order() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let bus = EventBus::new();
        bus.subscribe(Box::new(Recorder(first.clone())));
        bus.subscribe(Box::new(Recorder(second.clone())));

        bus.emit(EditorEvent::FillApplied { filled: 3 });
        bus.emit(EditorEvent::CursorMoved { x: 1, y: 2 });

        assert_eq!(bus.handler_count(), 2);
        assert_eq!(first.borrow().len(), 2);
        assert_eq!(*second.borrow(), *first.borrow());
        assert_eq!(first.borrow()[0], EditorEvent::FillApplied { filled: 3 });
    }
}
