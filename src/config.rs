use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::export::DEFAULT_EXPORT_NAME;
use crate::style::{ShapeKind, ToolConfig};

/// Environment variable naming an optional JSON settings file
pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";

/// Startup settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Native pixel width of both surfaces
    pub canvas_width: u32,
    /// Native pixel height of both surfaces
    pub canvas_height: u32,
    pub color: String,
    pub stroke_width: f32,
    pub shape: ShapeKind,
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 500,
            color: "#000000".to_string(),
            stroke_width: 5.0,
            shape: ShapeKind::Freehand,
            export_path: PathBuf::from(DEFAULT_EXPORT_NAME),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Settings from the file named by `SKETCHPAD_CONFIG`, or defaults
    /// when the variable is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("Loading settings from {}", Path::new(&path).display());
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(self)
    }

    /// Initial live tool configuration
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig::new(&self.color, self.stroke_width, self.shape)
    }
}
