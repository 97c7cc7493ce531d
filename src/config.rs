use std::path::Path;

use egui::{Color32, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::parse_hex_color;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "CANVAS_CONFIG";

/// Canvas and backend settings.
///
/// Missing fields take their defaults, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "height": 640.0, "background": "#202020" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    /// Stage background, `#rrggbb`
    pub background: String,
    /// Initial brush and shape colour, `#rrggbb`
    pub default_color: String,
    pub font_family: String,
    /// Image generation endpoint. Generation is disabled when unset.
    pub generation_endpoint: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 500.0,
            background: "#1a1a1a".to_owned(),
            default_color: "#000000".to_owned(),
            font_family: "Arial".to_owned(),
            generation_endpoint: None,
        }
    }
}

impl CanvasConfig {
    /// Load from the file named by `CANVAS_CONFIG`, or defaults if it is unset
    /// or unreadable.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded canvas config from {}", path);
                config
            }
            Err(err) => {
                warn!("Falling back to default canvas config: {}", err);
                Self::default()
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        // NaN fails both comparisons and is rejected too
        if !(config.width > 0.0 && config.height > 0.0) {
            return Err(ConfigError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }
        config.background_color()?;
        config.default_color()?;
        Ok(config)
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn background_color(&self) -> Result<Color32, ConfigError> {
        color_field("background", &self.background)
    }

    pub fn default_color(&self) -> Result<Color32, ConfigError> {
        color_field("default_color", &self.default_color)
    }
}

fn color_field(field: &'static str, value: &str) -> Result<Color32, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_owned(),
    })
}
