mod editor_state;
pub mod context;

pub use context::{EditorContext, LiveShape};
pub use editor_state::{CanvasDimensions, EditorState};
