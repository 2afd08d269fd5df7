//! Configuration system
//!
//! Configuration files are TOML or RON, picked by extension. Every field has
//! a default, so a partial file (or no file at all) is valid.

pub use serde::{Serialize, Deserialize};

use crate::render::Color;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed simulation rate; every frame advances by `1 / frame_rate` seconds
    pub frame_rate: u32,
    /// Colour the render target is cleared to before contexts draw
    pub background_color: Color,
    /// Device tuning
    pub input: InputConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            background_color: Color::WHITE,
            input: InputConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Fixed delta time in seconds
    pub fn delta_time(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be at least 1".to_string()));
        }
        self.input.validate()
    }
}

/// Gamepad tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radial stick deadzone, as a fraction of full deflection
    pub stick_deadzone: f32,
    /// Analog trigger value above which the trigger reads as a button press
    pub trigger_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        // XInput's recommended left-stick deadzone and trigger threshold
        Self {
            stick_deadzone: 7849.0 / 32767.0,
            trigger_threshold: 30.0 / 255.0,
        }
    }
}

impl InputConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.stick_deadzone) {
            return Err(ConfigError::Invalid(format!(
                "stick_deadzone must be in [0, 1), got {}",
                self.stick_deadzone
            )));
        }
        if !(0.0..1.0).contains(&self.trigger_threshold) {
            return Err(ConfigError::Invalid(format!(
                "trigger_threshold must be in [0, 1), got {}",
                self.trigger_threshold
            )));
        }
        Ok(())
    }
}
