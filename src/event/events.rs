use crate::tools::{ShapeKind, ToolKind};

/// Notifications the editor sends to whoever displays its state
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Undo or redo availability may have changed
    HistoryChanged { can_undo: bool, can_redo: bool },
    CanvasResized { width: u32, height: u32 },
    ToolChanged { old: ToolKind, new: ToolKind },
    /// Pointer position in canvas pixels
    CursorMoved { x: i32, y: i32 },
    /// A shape was finished and got its edit handles
    ShapeCommitted { kind: ShapeKind },
    FillApplied { filled: usize },
}
