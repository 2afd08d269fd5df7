//! # Context Engine
//!
//! Context stack and semantic input core for fixed-rate 2D games.
//!
//! ## Features
//!
//! - **Context Stack**: gameplay, menus and dialogs as stackable contexts,
//!   advanced top-only and rendered in layers
//! - **Semantic Input**: keyboard and gamepad folded into one set of actions
//! - **Device Arbitration**: one device wins each frame
//! - **Bleed Suppression**: a key held through a context switch stays dead
//!   until released
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use context_engine::prelude::*;
//!
//! struct Title;
//!
//! impl Context for Title {
//!     fn advance(&mut self, _delta_time: f32, control: &mut ContextControl<'_>) {
//!         if control.input().serve_ball.is_just_pressed() {
//!             control.exit_self().ok();
//!         }
//!     }
//!
//!     fn render(&self, surface: &mut dyn RenderTarget) {
//!         surface.draw_text(Vec2::new(10.0, 10.0), "Press Space", Color::BLACK);
//!     }
//!
//!     fn is_opaque(&self) -> bool { true }
//!     fn is_menu(&self) -> bool { false }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine: Engine = Engine::new(EngineConfig::default())?;
//!     let title = engine.contexts.register(Title);
//!     engine.contexts.enter(title)?;
//!     engine.contexts.bind_surface(RecordingSurface::new(400, 600));
//!
//!     let keyboard = VirtualKeyboard::new();
//!     let mut gamepads: Vec<VirtualGamepad> = Vec::new();
//!     let mut timestep = FixedTimestep::new(engine.config().frame_rate);
//!     while engine.is_running() {
//!         engine.frame(&keyboard, &mut gamepads);
//!         timestep.wait_for_next_frame();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod context;
pub mod foundation;
pub mod input;
pub mod render;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig, InputConfig},
        context::{Context, ContextControl, ContextError, ContextKey, ContextManager, InputFocus},
        foundation::{math::Vec2, time::FixedTimestep},
        input::{
            Action, ButtonState, Device, Gamepad, GamepadButton, GamepadSnapshot,
            InputActionStates, InputManager, KeyCode, KeyboardDevice, VirtualGamepad,
            VirtualKeyboard,
        },
        render::{Color, DrawCommand, Rect, RecordingSurface, RenderTarget},
        Engine, EngineError,
    };
}
