//! Core engine implementation

use crate::{
    config::{ConfigError, EngineConfig},
    context::ContextManager,
    input::{Gamepad, InputManager, KeyboardDevice},
    render::{RecordingSurface, RenderTarget},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the context stack and the input manager and runs them in the fixed
/// per-frame order: input first, then the context tick (advance + render).
/// Device refresh and presenting the surface stay with the host.
pub struct Engine<S = RecordingSurface> {
    /// Context stack and its render target
    pub contexts: ContextManager<S>,

    /// Semantic input translation
    pub input: InputManager,

    /// Engine configuration
    config: EngineConfig,

    frame_count: u64,

    /// Cleared by [`Engine::quit`]
    running: bool,
}

impl<S: RenderTarget> Engine<S> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine at {} fps, background {:?}",
            config.frame_rate,
            config.background_color
        );

        Ok(Self {
            contexts: ContextManager::with_background(config.background_color),
            input: InputManager::new(),
            config,
            frame_count: 0,
            running: true,
        })
    }

    /// Run one fixed-length frame.
    ///
    /// Gamepads must already hold this frame's readings.
    pub fn frame<K, G>(&mut self, keyboard: &K, gamepads: &mut [G])
    where
        K: KeyboardDevice + ?Sized,
        G: Gamepad,
    {
        let delta_time = self.config.delta_time();

        let focus = self.contexts.input_focus();
        self.input.update(delta_time, focus, keyboard, gamepads);
        self.contexts.tick(delta_time, self.input.state());

        self.frame_count += 1;
        log::trace!(
            "Frame {} done, stack depth {}",
            self.frame_count,
            self.contexts.stack().len()
        );
    }

    /// Whether the host should keep calling [`Engine::frame`]
    pub fn is_running(&self) -> bool {
        self.running && !self.contexts.is_empty()
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Fixed delta time in seconds
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
