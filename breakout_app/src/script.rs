//! Scripted device input for headless runs
//!
//! A script is a RON list of frames. Each entry holds the keys down, the
//! window focus and an optional gamepad reading, repeated `repeat` times.

use context_engine::input::{GamepadSnapshot, KeyCode};
use serde::{Deserialize, Serialize};

/// Built-in script: steer, serve, pause, pick "Quit"
pub const DEMO_SCRIPT: &str = include_str!("../scripts/demo.ron");

/// One or more identical frames of device state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptFrame {
    /// Keys held
    pub keys: Vec<KeyCode>,
    /// Whether the window has focus
    pub focused: bool,
    /// Reading for the first gamepad slot; `None` means nothing plugged in
    pub gamepad: Option<GamepadSnapshot>,
    /// How many frames this entry lasts
    pub repeat: u32,
}

impl Default for ScriptFrame {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            focused: true,
            gamepad: None,
            repeat: 1,
        }
    }
}

/// Script errors
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Frame-by-frame input script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    /// Entries in playback order
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Parse a script from RON text
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        ron::from_str(source).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    /// Load a script file
    pub fn load(path: &str) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// The built-in demo script
    pub fn demo() -> Result<Self, ScriptError> {
        Self::parse(DEMO_SCRIPT)
    }

    /// Every frame with repeats expanded
    pub fn frames(&self) -> impl Iterator<Item = &ScriptFrame> {
        self.frames
            .iter()
            .flat_map(|frame| std::iter::repeat(frame).take(frame.repeat as usize))
    }

    /// Total frame count with repeats expanded
    pub fn len(&self) -> usize {
        self.frames.iter().map(|frame| frame.repeat as usize).sum()
    }

    /// Whether the script plays no frames at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
