mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::EditorEvent;
pub use handlers::{EditorStatus, LoggingEventHandler, StatusEventHandler};

/// Receives editor events synchronously, in emission order.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}
