//! Breakout demo application
//!
//! Runs the gameplay and pause menu contexts headless, at the configured
//! fixed frame rate, driven by a scripted keyboard and gamepad.
//!
//! ```text
//! breakout [config.toml|config.ron] [script.ron]
//! ```

mod contexts;
mod script;

use contexts::{GameplayContext, PauseMenuContext, FIELD_HEIGHT, FIELD_WIDTH};
use context_engine::foundation::logging::{self, LevelFilter};
use context_engine::prelude::*;
use script::{InputScript, ScriptError};
use thiserror::Error;

/// Application errors
#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Input script: {0}")]
    Script(#[from] ScriptError),
}

fn main() -> Result<(), AppError> {
    logging::init_with_level(LevelFilter::Info);

    log::info!("Starting Breakout demo");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            EngineConfig::load_from_file(&path)?
        }
        None => EngineConfig::default(),
    };
    let script = match args.next() {
        Some(path) => {
            log::info!("Loading input script from {}", path);
            InputScript::load(&path)?
        }
        None => InputScript::demo()?,
    };

    let result = run(config, &script);
    match &result {
        Ok(frames) => log::info!("Demo finished after {} frames", frames),
        Err(err) => log::error!("Demo failed: {}", err),
    }
    result.map(|_| ())
}

/// Play `script` until it runs out or the context stack empties
fn run(config: EngineConfig, script: &InputScript) -> Result<u64, AppError> {
    let mut engine: Engine = Engine::new(config)?;

    let pause_menu = engine.contexts.register(PauseMenuContext::new());
    let gameplay = engine.contexts.register(GameplayContext::new(pause_menu));
    engine.contexts.enter(gameplay)?;
    engine
        .contexts
        .bind_surface(RecordingSurface::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32));

    let mut keyboard = VirtualKeyboard::new();
    let mut gamepads = vec![VirtualGamepad::new(&engine.config().input)];
    let mut timestep = FixedTimestep::new(engine.config().frame_rate);

    log::info!("Playing {} scripted frames", script.len());
    for frame in script.frames() {
        if !engine.is_running() {
            break;
        }

        keyboard.set_focused(frame.focused);
        keyboard.set_held_keys(frame.keys.iter().copied());
        let reading = frame
            .gamepad
            .clone()
            .unwrap_or_else(GamepadSnapshot::disconnected);
        for gamepad in &mut gamepads {
            gamepad.update(&reading);
        }

        engine.frame(&keyboard, &mut gamepads);
        present(&mut engine);
        timestep.wait_for_next_frame();
    }

    if engine.is_running() {
        log::info!("Input script ended with the game still running");
    }
    Ok(engine.frame_count())
}

/// Stand-in for a display flip: drain the frame's draw calls into the log
fn present(engine: &mut Engine) {
    let changed = engine.contexts.context_changed_last_frame();
    let frame = engine.frame_count();
    let Some(surface) = engine.contexts.surface_mut() else {
        return;
    };

    let commands = surface.take_commands();
    log::trace!("Frame {}: {} draw commands", frame, commands.len());
    if changed {
        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        log::info!("Frame {}: screen now shows {:?}", frame, texts);
    }
}
