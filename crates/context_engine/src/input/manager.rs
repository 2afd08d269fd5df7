//! Input Manager - raw device state to semantic actions
//!
//! Runs once per frame before the context stack ticks. The steps are:
//!
//! 1. reset the semantic state (the last-used device survives)
//! 2. maintain the ignore set across context switches
//! 3. pick one device: the first gamepad making input, else the keyboard
//! 4. map that device with the gameplay or menu bindings
//! 5. clamp directional vectors to the unit circle
//! 6. for a gamepad, turn the directional vector into navigate presses

use super::gamepad::{Gamepad, GamepadButton};
use super::keyboard::{KeyCode, KeyboardDevice};
use super::state::{ButtonState, Device, InputActionStates};
use crate::context::InputFocus;
use crate::foundation::math::Vec2;
use std::collections::HashSet;

/// Translates keyboard and gamepad state into [`InputActionStates`]
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    state: InputActionStates,

    /// Raw keys down the last time the keyboard was mapped
    last_pressed_keys: HashSet<KeyCode>,

    /// Keys held through a context switch, masked until released
    ignored_keys: HashSet<KeyCode>,
}

impl InputManager {
    /// Create an input manager with idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// This frame's semantic input
    pub fn state(&self) -> &InputActionStates {
        &self.state
    }

    /// Keys currently masked by a context switch
    pub fn ignored_keys(&self) -> &HashSet<KeyCode> {
        &self.ignored_keys
    }

    /// Whether `key` is currently masked by a context switch
    pub fn is_ignored(&self, key: KeyCode) -> bool {
        self.ignored_keys.contains(&key)
    }

    /// Rebuild the semantic state for this frame.
    ///
    /// `focus` must describe the stack as the previous tick left it.
    /// Gamepads must already be refreshed for this frame.
    pub fn update<K, G>(
        &mut self,
        _delta_time: f32,
        focus: InputFocus,
        keyboard: &K,
        gamepads: &mut [G],
    ) where
        K: KeyboardDevice + ?Sized,
        G: Gamepad,
    {
        let previous = self.state.clone();
        self.state.reset();

        self.update_ignore_states(focus, keyboard, gamepads);

        let winner = gamepads
            .iter()
            .find(|gamepad| gamepad.is_connected() && gamepad.any_inputs_being_made());

        match winner {
            Some(gamepad) => {
                self.state.last_keynav_device = Device::Gamepad;
                self.update_from_gamepad(gamepad, keyboard.is_focused(), focus.in_menu);
            }
            None => {
                self.update_from_keyboard(keyboard, focus.in_menu);
                if self.state.any_active() {
                    self.state.last_keynav_device = Device::Keyboard;
                }
            }
        }

        self.state.normalize();
        if winner.is_some() {
            self.finalize_navigation(&previous);
        }

        if self.state.last_keynav_device != previous.last_keynav_device {
            log::debug!(
                "Navigation device changed: {:?} -> {:?}",
                previous.last_keynav_device,
                self.state.last_keynav_device
            );
        }
    }

    fn update_ignore_states<K, G>(&mut self, focus: InputFocus, keyboard: &K, gamepads: &mut [G])
    where
        K: KeyboardDevice + ?Sized,
        G: Gamepad,
    {
        if !focus.context_changed_last_frame {
            // gamepads drop their own masks on release
            self.ignored_keys.retain(|&key| keyboard.is_key_down(key));
            return;
        }

        let held = pressed_keys(keyboard);
        if !held.is_empty() {
            log::debug!("Context changed, ignoring held keys {:?}", held);
        }
        self.ignored_keys.extend(held);

        for gamepad in gamepads.iter_mut().filter(|gamepad| gamepad.is_connected()) {
            gamepad.ignore_all_currently_down_buttons();
        }
    }

    fn update_from_keyboard<K>(&mut self, keyboard: &K, in_menu: bool)
    where
        K: KeyboardDevice + ?Sized,
    {
        if !keyboard.is_focused() {
            return;
        }

        let pressed = pressed_keys(keyboard);
        let modifiers = keyboard.modifiers();
        if !modifiers.is_empty() {
            log::trace!("Modifiers held: {:?}", modifiers);
        }

        let mut direction = Vec2::zeros();
        if self.any_live(&pressed, &[KeyCode::W, KeyCode::Up]) {
            direction.y -= 1.0;
        }
        if self.any_live(&pressed, &[KeyCode::S, KeyCode::Down]) {
            direction.y += 1.0;
        }
        if self.any_live(&pressed, &[KeyCode::A, KeyCode::Left]) {
            direction.x -= 1.0;
        }
        if self.any_live(&pressed, &[KeyCode::D, KeyCode::Right]) {
            direction.x += 1.0;
        }
        self.state.directional_move += direction;

        if !in_menu {
            self.state.toggle_pause = self.key_state(&pressed, KeyCode::Escape);
            self.state.serve_ball = self.key_state(&pressed, KeyCode::Space);
        } else {
            self.state.activate = self.key_state(&pressed, KeyCode::Space);
            self.state.cancel = self.key_state(&pressed, KeyCode::Escape);
            self.state.page_up = self.key_state(&pressed, KeyCode::PageUp);
            self.state.page_down = self.key_state(&pressed, KeyCode::PageDown);

            self.state.navigate_up = self.key_state(&pressed, KeyCode::Up);
            self.state.navigate_down = self.key_state(&pressed, KeyCode::Down);
            self.state.navigate_left = self.key_state(&pressed, KeyCode::Left);
            self.state.navigate_right = self.key_state(&pressed, KeyCode::Right);
        }

        self.state.normalize();
        self.last_pressed_keys = pressed;
    }

    fn update_from_gamepad<G>(&mut self, gamepad: &G, focused: bool, in_menu: bool)
    where
        G: Gamepad + ?Sized,
    {
        if !focused {
            return;
        }

        let mut direction = gamepad.left_stick();
        if gamepad.is_button_down(GamepadButton::DPadUp) {
            direction.y -= 1.0;
        }
        if gamepad.is_button_down(GamepadButton::DPadDown) {
            direction.y += 1.0;
        }
        if gamepad.is_button_down(GamepadButton::DPadLeft) {
            direction.x -= 1.0;
        }
        if gamepad.is_button_down(GamepadButton::DPadRight) {
            direction.x += 1.0;
        }
        self.state.directional_move = direction;
        self.state.directional_alt = gamepad.right_stick();

        let state_of = |button: GamepadButton| {
            if !gamepad.is_button_down(button) {
                ButtonState::Up
            } else if gamepad.button_pressed_now(button) {
                ButtonState::Down
            } else {
                ButtonState::Held
            }
        };

        if !in_menu {
            self.state.toggle_pause = state_of(GamepadButton::Start);
            self.state.serve_ball = state_of(GamepadButton::A);
        } else {
            self.state.activate = state_of(GamepadButton::A);
            self.state.cancel = state_of(GamepadButton::B);
            self.state.page_up = state_of(GamepadButton::LeftTrigger);
            self.state.page_down = state_of(GamepadButton::RightTrigger);
        }
    }

    /// Derive discrete navigation from the combined stick and D-pad vector
    fn finalize_navigation(&mut self, previous: &InputActionStates) {
        let direction = self.state.directional_move;

        if direction.y < 0.0 {
            self.state.navigate_down = ButtonState::Up;
            self.state.navigate_up = asserted(previous.navigate_up);
        } else if direction.y > 0.0 {
            self.state.navigate_up = ButtonState::Up;
            self.state.navigate_down = asserted(previous.navigate_down);
        }

        if direction.x < 0.0 {
            self.state.navigate_right = ButtonState::Up;
            self.state.navigate_left = asserted(previous.navigate_left);
        } else if direction.x > 0.0 {
            self.state.navigate_left = ButtonState::Up;
            self.state.navigate_right = asserted(previous.navigate_right);
        }
    }

    fn is_live(&self, pressed: &HashSet<KeyCode>, key: KeyCode) -> bool {
        pressed.contains(&key) && !self.ignored_keys.contains(&key)
    }

    fn any_live(&self, pressed: &HashSet<KeyCode>, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_live(pressed, key))
    }

    fn key_state(&self, pressed: &HashSet<KeyCode>, key: KeyCode) -> ButtonState {
        ButtonState::from_edges(
            self.is_live(pressed, key),
            self.last_pressed_keys.contains(&key),
        )
    }
}

/// Edge-trigger a direction once, then hold it
fn asserted(previous: ButtonState) -> ButtonState {
    if previous.is_pressed() {
        ButtonState::Held
    } else {
        ButtonState::Down
    }
}

fn pressed_keys<K: KeyboardDevice + ?Sized>(keyboard: &K) -> HashSet<KeyCode> {
    KeyCode::ALL
        .iter()
        .copied()
        .filter(|&key| keyboard.is_key_down(key))
        .collect()
}
