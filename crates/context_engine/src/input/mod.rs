//! Input management system
//!
//! Devices are capabilities ([`KeyboardDevice`], [`Gamepad`]) supplied by the
//! host. [`InputManager`] reads them once per frame and produces a single
//! device-independent [`InputActionStates`] for the active context.

mod gamepad;
mod keyboard;
mod manager;
mod state;

pub use gamepad::{Gamepad, GamepadButton, GamepadSnapshot, VirtualGamepad};
pub use keyboard::{KeyCode, KeyboardDevice, Modifiers, VirtualKeyboard};
pub use manager::InputManager;
pub use state::{Action, ButtonState, Device, InputActionStates, KEY_REPEAT_INTERVAL};
