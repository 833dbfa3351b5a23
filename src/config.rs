use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gizmo::HandleStyle;
use crate::state::CanvasDimensions;
use crate::tools::ToolKind;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to serialize settings: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tool selection, stroke width and the two active colors.
///
/// Owned by the UI layer; the editor reads it and never changes it on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub tool: ToolKind,
    pub width: f32,
    pub primary: Color32,
    pub secondary: Color32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            width: 1.0,
            primary: Color32::BLACK,
            secondary: Color32::WHITE,
        }
    }
}

/// Initial canvas size and the limits a resize is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    /// Initial fill; `None` leaves the canvas transparent
    pub background: Option<Color32>,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 700,
            height: 400,
            min_width: 1,
            min_height: 1,
            max_width: 8192,
            max_height: 8192,
            background: None,
        }
    }
}

impl CanvasSettings {
    /// Clamps a requested size (possibly negative, from a pointer
    /// position) into the configured limits.
    pub fn clamp(&self, width: f32, height: f32) -> CanvasDimensions {
        let clamp_axis = |value: f32, min: u32, max: u32| {
            let min = min.max(1);
            let max = max.max(min);
            if value.is_finite() {
                value.round().clamp(min as f32, max as f32) as u32
            } else {
                min
            }
        };
        CanvasDimensions::new(
            clamp_axis(width, self.min_width, self.max_width),
            clamp_axis(height, self.min_height, self.max_height),
        )
    }

    pub fn initial_dimensions(&self) -> CanvasDimensions {
        self.clamp(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// `None` keeps every snapshot for the whole session
    pub max_depth: Option<usize>,
}

/// Everything the editor can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    pub canvas: CanvasSettings,
    pub tool: ToolConfig,
    pub history: HistoryConfig,
    pub handles: HandleStyle,
}

impl PaintSettings {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} must be non-zero",
                self.canvas.width, self.canvas.height
            )));
        }
        if !(self.tool.width.is_finite() && self.tool.width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke width {} must be positive",
                self.tool.width
            )));
        }
        if !(self.handles.size.is_finite() && self.handles.size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "handle size {} must be positive",
                self.handles.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_canvas() {
        let settings = PaintSettings::default();
        assert_eq!(settings.canvas.initial_dimensions(), CanvasDimensions::new(700, 400));
        assert_eq!(settings.tool.tool, ToolKind::Pen);
        assert_eq!(settings.history.max_depth, None);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = PaintSettings::from_json(r#"{ "canvas": { "width": 320 } }"#).unwrap();
        assert_eq!(settings.canvas.width, 320);
        assert_eq!(settings.canvas.height, 400);
        assert_eq!(settings.tool, ToolConfig::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_shape_tool() {
        let mut settings = PaintSettings::default();
        settings.tool.tool = ToolKind::TRIANGLE;
        settings.history.max_depth = Some(20);

        let restored = PaintSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let err = PaintSettings::from_json(r#"{ "tool": { "width": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PaintSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::SerializationError(_)));
    }

    #[test]
    fn test_clamp_never_produces_empty_canvas() {
        let canvas = CanvasSettings::default();
        assert_eq!(canvas.clamp(-40.0, 0.0), CanvasDimensions::new(1, 1));
        assert_eq!(canvas.clamp(1e9, 12.4), CanvasDimensions::new(8192, 12));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("canvas_paint_cfg_{}", std::process::id()));
        let path = dir.join("settings.json");
        let mut settings = PaintSettings::default();
        settings.tool.width = 5.0;

        settings.save(&path).unwrap();
        let loaded = PaintSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(dir);
    }
}
