//! Gamepad capability
//!
//! [`Gamepad`] is what the input manager consumes. [`VirtualGamepad`] is an
//! XInput-style implementation the host refreshes once per frame from a raw
//! [`GamepadSnapshot`]; it owns the per-button "ignored until released"
//! bookkeeping so the input manager never has to.

use crate::config::InputConfig;
use crate::foundation::math::{self, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Gamepad buttons (XInput layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadButton {
    /// Bottom face button
    A,
    /// Right face button
    B,
    /// Left face button
    X,
    /// Top face button
    Y,
    /// Start / Menu
    Start,
    /// Back / View
    Back,
    /// Left bumper
    LeftShoulder,
    /// Right bumper
    RightShoulder,
    /// Left trigger past its threshold
    LeftTrigger,
    /// Right trigger past its threshold
    RightTrigger,
    /// Left stick click
    LeftThumb,
    /// Right stick click
    RightThumb,
    /// D-pad up
    DPadUp,
    /// D-pad down
    DPadDown,
    /// D-pad left
    DPadLeft,
    /// D-pad right
    DPadRight,
}

impl GamepadButton {
    /// Every button
    pub const ALL: [GamepadButton; 16] = [
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::Start,
        GamepadButton::Back,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::LeftTrigger,
        GamepadButton::RightTrigger,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
        GamepadButton::DPadUp,
        GamepadButton::DPadDown,
        GamepadButton::DPadLeft,
        GamepadButton::DPadRight,
    ];
}

/// Processed gamepad state consumed by the input manager
pub trait Gamepad {
    /// Whether a controller is plugged in at this slot
    fn is_connected(&self) -> bool;

    /// Left stick after deadzone, y grows downward
    fn left_stick(&self) -> Vec2;

    /// Right stick after deadzone, y grows downward
    fn right_stick(&self) -> Vec2;

    /// Whether `button` is down and not being ignored
    fn is_button_down(&self, button: GamepadButton) -> bool;

    /// Whether `button` went down on this exact frame
    fn button_pressed_now(&self, button: GamepadButton) -> bool;

    /// Whether any button is down or any stick is deflected
    fn any_inputs_being_made(&self) -> bool;

    /// Treat every currently-down button as up until it is released
    fn ignore_all_currently_down_buttons(&mut self);
}

impl<G: Gamepad + ?Sized> Gamepad for Box<G> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn left_stick(&self) -> Vec2 {
        (**self).left_stick()
    }

    fn right_stick(&self) -> Vec2 {
        (**self).right_stick()
    }

    fn is_button_down(&self, button: GamepadButton) -> bool {
        (**self).is_button_down(button)
    }

    fn button_pressed_now(&self, button: GamepadButton) -> bool {
        (**self).button_pressed_now(button)
    }

    fn any_inputs_being_made(&self) -> bool {
        (**self).any_inputs_being_made()
    }

    fn ignore_all_currently_down_buttons(&mut self) {
        (**self).ignore_all_currently_down_buttons();
    }
}

/// Raw controller reading for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadSnapshot {
    /// Whether the controller is present
    pub connected: bool,
    /// Digital buttons held
    pub buttons: Vec<GamepadButton>,
    /// Raw left stick, each axis in -1..=1, y down
    pub left_stick: (f32, f32),
    /// Raw right stick, each axis in -1..=1, y down
    pub right_stick: (f32, f32),
    /// Analog left trigger, 0..=1
    pub left_trigger: f32,
    /// Analog right trigger, 0..=1
    pub right_trigger: f32,
}

impl Default for GamepadSnapshot {
    fn default() -> Self {
        Self {
            connected: true,
            buttons: Vec::new(),
            left_stick: (0.0, 0.0),
            right_stick: (0.0, 0.0),
            left_trigger: 0.0,
            right_trigger: 0.0,
        }
    }
}

impl GamepadSnapshot {
    /// A reading for an empty slot
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::default()
        }
    }

    /// Connected reading with the given buttons held
    pub fn with_buttons(buttons: impl IntoIterator<Item = GamepadButton>) -> Self {
        Self {
            buttons: buttons.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Frame-to-frame gamepad state tracker
#[derive(Debug, Clone)]
pub struct VirtualGamepad {
    connected: bool,
    /// Buttons physically down this frame
    down: HashSet<GamepadButton>,
    /// Buttons physically down last frame
    previous: HashSet<GamepadButton>,
    /// Buttons held through a context switch, masked until released
    ignored: HashSet<GamepadButton>,
    left_stick: Vec2,
    right_stick: Vec2,
    stick_deadzone: f32,
    trigger_threshold: f32,
}

impl VirtualGamepad {
    /// Create a disconnected gamepad slot
    pub fn new(config: &InputConfig) -> Self {
        Self {
            connected: false,
            down: HashSet::new(),
            previous: HashSet::new(),
            ignored: HashSet::new(),
            left_stick: Vec2::zeros(),
            right_stick: Vec2::zeros(),
            stick_deadzone: config.stick_deadzone,
            trigger_threshold: config.trigger_threshold,
        }
    }

    /// Refresh from this frame's raw reading. Call once per frame, before
    /// the input manager runs.
    pub fn update(&mut self, snapshot: &GamepadSnapshot) {
        if !snapshot.connected {
            if self.connected {
                log::debug!("Gamepad disconnected");
            }
            self.connected = false;
            self.down.clear();
            self.previous.clear();
            self.ignored.clear();
            self.left_stick = Vec2::zeros();
            self.right_stick = Vec2::zeros();
            return;
        }

        if !self.connected {
            log::debug!("Gamepad connected");
            self.connected = true;
        }

        let mut down: HashSet<GamepadButton> = snapshot.buttons.iter().copied().collect();
        if snapshot.left_trigger > self.trigger_threshold {
            down.insert(GamepadButton::LeftTrigger);
        }
        if snapshot.right_trigger > self.trigger_threshold {
            down.insert(GamepadButton::RightTrigger);
        }

        self.previous = std::mem::replace(&mut self.down, down);
        self.ignored.retain(|button| self.down.contains(button));

        self.left_stick = math::apply_radial_deadzone(
            Vec2::new(snapshot.left_stick.0, snapshot.left_stick.1),
            self.stick_deadzone,
        );
        self.right_stick = math::apply_radial_deadzone(
            Vec2::new(snapshot.right_stick.0, snapshot.right_stick.1),
            self.stick_deadzone,
        );
    }

    /// Whether `button` is currently masked by a context switch
    pub fn is_ignored(&self, button: GamepadButton) -> bool {
        self.ignored.contains(&button)
    }
}

impl Gamepad for VirtualGamepad {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn left_stick(&self) -> Vec2 {
        self.left_stick
    }

    fn right_stick(&self) -> Vec2 {
        self.right_stick
    }

    fn is_button_down(&self, button: GamepadButton) -> bool {
        self.down.contains(&button) && !self.ignored.contains(&button)
    }

    fn button_pressed_now(&self, button: GamepadButton) -> bool {
        self.is_button_down(button) && !self.previous.contains(&button)
    }

    fn any_inputs_being_made(&self) -> bool {
        if !self.connected {
            return false;
        }
        !math::is_zero(&self.left_stick)
            || !math::is_zero(&self.right_stick)
            || self.down.iter().any(|button| !self.ignored.contains(button))
    }

    fn ignore_all_currently_down_buttons(&mut self) {
        self.ignored.extend(self.down.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> VirtualGamepad {
        VirtualGamepad::new(&InputConfig::default())
    }

    #[test]
    fn test_starts_disconnected() {
        let gamepad = pad();
        assert!(!gamepad.is_connected());
        assert!(!gamepad.any_inputs_being_made());
    }

    #[test]
    fn test_press_edge_then_hold() {
        let mut gamepad = pad();
        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::A]));
        assert!(gamepad.is_button_down(GamepadButton::A));
        assert!(gamepad.button_pressed_now(GamepadButton::A));

        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::A]));
        assert!(gamepad.is_button_down(GamepadButton::A));
        assert!(!gamepad.button_pressed_now(GamepadButton::A));

        gamepad.update(&GamepadSnapshot::default());
        assert!(!gamepad.is_button_down(GamepadButton::A));
    }

    #[test]
    fn test_ignored_until_released() {
        let mut gamepad = pad();
        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::Start]));
        gamepad.ignore_all_currently_down_buttons();

        assert!(gamepad.is_ignored(GamepadButton::Start));
        assert!(!gamepad.is_button_down(GamepadButton::Start));
        assert!(!gamepad.any_inputs_being_made());

        // still held: still masked
        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::Start]));
        assert!(!gamepad.is_button_down(GamepadButton::Start));

        // released: mask dropped
        gamepad.update(&GamepadSnapshot::default());
        assert!(!gamepad.is_ignored(GamepadButton::Start));

        // fresh press reads as a new press
        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::Start]));
        assert!(gamepad.button_pressed_now(GamepadButton::Start));
    }

    #[test]
    fn test_triggers_promote_past_threshold() {
        let mut gamepad = pad();
        gamepad.update(&GamepadSnapshot {
            left_trigger: 0.05,
            right_trigger: 0.9,
            ..GamepadSnapshot::default()
        });
        assert!(!gamepad.is_button_down(GamepadButton::LeftTrigger));
        assert!(gamepad.is_button_down(GamepadButton::RightTrigger));
    }

    #[test]
    fn test_stick_deadzone_counts_as_no_input() {
        let mut gamepad = pad();
        gamepad.update(&GamepadSnapshot {
            left_stick: (0.05, -0.05),
            ..GamepadSnapshot::default()
        });
        assert!(gamepad.is_connected());
        assert!(!gamepad.any_inputs_being_made());

        gamepad.update(&GamepadSnapshot {
            left_stick: (0.0, -1.0),
            ..GamepadSnapshot::default()
        });
        assert!(gamepad.any_inputs_being_made());
        assert!(gamepad.left_stick().y < 0.0);
    }

    #[test]
    fn test_disconnect_clears_state() {
        let mut gamepad = pad();
        gamepad.update(&GamepadSnapshot::with_buttons([GamepadButton::B]));
        gamepad.update(&GamepadSnapshot::disconnected());
        assert!(!gamepad.is_connected());
        assert!(!gamepad.is_button_down(GamepadButton::B));
    }

    #[test]
    fn test_boxed_gamepad_delegates() {
        let mut boxed: Box<dyn Gamepad> = Box::new(pad());
        assert!(!boxed.is_connected());
        boxed.ignore_all_currently_down_buttons();
        assert!(!boxed.any_inputs_being_made());
    }
}
