use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the fallible construction and configuration APIs.
///
/// Interactive editing never fails: pointer handling, history and fill
/// resolve their edge cases locally.
#[derive(Debug, Error)]
pub enum PaintError {
    /// A canvas or surface was requested with a zero dimension
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Raw pixel data does not match the requested dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A tool name that does not correspond to any tool
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type PaintResult<T> = Result<T, PaintError>;
