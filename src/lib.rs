#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod gizmo;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod tools;
pub mod widgets;

pub use app::PaintApp;
pub use command::RasterHistory;
pub use config::{CanvasSettings, ConfigError, HistoryConfig, PaintSettings, ToolConfig};
pub use error::{PaintError, PaintResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use gizmo::{CanvasEdge, EditHandle, HandleId, HandleManager, HandleStyle};
pub use input::{CoordinateMapper, EventTarget, InputEvent, InputHandler, InputLocation};
pub use renderer::CanvasRenderer;
pub use state::{CanvasDimensions, EditorContext, EditorState, LiveShape};
pub use surface::{LineCap, RasterSurface, Surface};
pub use tools::{ShapeField, ShapeGeometry, ShapeKind, ToolKind};
