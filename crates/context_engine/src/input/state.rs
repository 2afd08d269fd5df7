//! Semantic input state
//!
//! Device-independent snapshot of what the player currently intends. Rebuilt
//! from scratch every frame by [`InputManager`](super::InputManager); only the
//! last-used navigation device survives a reset.

use crate::foundation::math::{self, Vec2};

/// Interval at which a held button would re-trigger as
/// [`ButtonState::AutoRepeat`], in seconds. Reserved: no mapping produces
/// auto-repeat yet.
pub const KEY_REPEAT_INTERVAL: f32 = 0.030;

/// Device that most recently produced navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// Nothing has been used yet
    #[default]
    None,
    /// Keyboard
    Keyboard,
    /// Mouse (reserved)
    Mouse,
    /// Any gamepad
    Gamepad,
}

/// Per-frame state of a semantic button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Not pressed
    #[default]
    Up,
    /// Pressed down on this frame
    Down,
    /// Pressed continuously since an earlier frame
    Held,
    /// Held and the repeat interval elapsed (reserved)
    AutoRepeat,
}

impl ButtonState {
    /// Derive the state of a digital input from this frame's and the previous
    /// frame's pressed flags.
    pub fn from_edges(pressed_now: bool, pressed_before: bool) -> Self {
        match (pressed_now, pressed_before) {
            (false, _) => ButtonState::Up,
            (true, true) => ButtonState::Held,
            (true, false) => ButtonState::Down,
        }
    }

    /// True for anything but `Up`
    pub fn is_pressed(self) -> bool {
        self != ButtonState::Up
    }

    /// True only on the frame the button went down
    pub fn is_just_pressed(self) -> bool {
        self == ButtonState::Down
    }

    /// True when a menu should act: first press or an auto-repeat tick
    pub fn is_triggered(self) -> bool {
        matches!(self, ButtonState::Down | ButtonState::AutoRepeat)
    }
}

/// Named semantic buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Launch the ball (gameplay)
    ServeBall,
    /// Open or close the pause menu (gameplay)
    TogglePause,
    /// Confirm the focused menu item
    Activate,
    /// Back out of the current menu
    Cancel,
    /// Previous page
    PageUp,
    /// Next page
    PageDown,
    /// Move menu focus up
    NavigateUp,
    /// Move menu focus down
    NavigateDown,
    /// Move menu focus left
    NavigateLeft,
    /// Move menu focus right
    NavigateRight,
}

impl Action {
    /// Every action, gameplay first
    pub const ALL: [Action; 10] = [
        Action::ServeBall,
        Action::TogglePause,
        Action::Activate,
        Action::Cancel,
        Action::PageUp,
        Action::PageDown,
        Action::NavigateUp,
        Action::NavigateDown,
        Action::NavigateLeft,
        Action::NavigateRight,
    ];

    /// Navigation actions are the only ones that may auto-repeat
    pub fn is_repeatable(self) -> bool {
        matches!(
            self,
            Action::NavigateUp | Action::NavigateDown | Action::NavigateLeft | Action::NavigateRight
        )
    }
}

/// Semantic action states for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct InputActionStates {
    /// Device that last produced navigation input. Kept across resets.
    pub last_keynav_device: Device,

    /// Arrow keys / WASD / left stick + D-pad, magnitude <= 1
    pub directional_move: Vec2,
    /// Right stick, magnitude <= 1
    pub directional_alt: Vec2,

    // Gameplay
    /// Serve the ball
    pub serve_ball: ButtonState,

    // UI
    /// Pause toggle (gameplay mapping)
    pub toggle_pause: ButtonState,
    /// Space / A
    pub activate: ButtonState,
    /// Escape / B
    pub cancel: ButtonState,
    /// Page Up / left trigger
    pub page_up: ButtonState,
    /// Page Down / right trigger
    pub page_down: ButtonState,
    /// Menu focus up
    pub navigate_up: ButtonState,
    /// Menu focus down
    pub navigate_down: ButtonState,
    /// Menu focus left
    pub navigate_left: ButtonState,
    /// Menu focus right
    pub navigate_right: ButtonState,
}

impl Default for InputActionStates {
    fn default() -> Self {
        Self {
            last_keynav_device: Device::None,
            directional_move: Vec2::zeros(),
            directional_alt: Vec2::zeros(),
            serve_ball: ButtonState::Up,
            toggle_pause: ButtonState::Up,
            activate: ButtonState::Up,
            cancel: ButtonState::Up,
            page_up: ButtonState::Up,
            page_down: ButtonState::Up,
            navigate_up: ButtonState::Up,
            navigate_down: ButtonState::Up,
            navigate_left: ButtonState::Up,
            navigate_right: ButtonState::Up,
        }
    }
}

impl InputActionStates {
    /// Create an idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a button by action
    pub fn button(&self, action: Action) -> ButtonState {
        match action {
            Action::ServeBall => self.serve_ball,
            Action::TogglePause => self.toggle_pause,
            Action::Activate => self.activate,
            Action::Cancel => self.cancel,
            Action::PageUp => self.page_up,
            Action::PageDown => self.page_down,
            Action::NavigateUp => self.navigate_up,
            Action::NavigateDown => self.navigate_down,
            Action::NavigateLeft => self.navigate_left,
            Action::NavigateRight => self.navigate_right,
        }
    }

    /// Mutable access to a button by action
    pub fn button_mut(&mut self, action: Action) -> &mut ButtonState {
        match action {
            Action::ServeBall => &mut self.serve_ball,
            Action::TogglePause => &mut self.toggle_pause,
            Action::Activate => &mut self.activate,
            Action::Cancel => &mut self.cancel,
            Action::PageUp => &mut self.page_up,
            Action::PageDown => &mut self.page_down,
            Action::NavigateUp => &mut self.navigate_up,
            Action::NavigateDown => &mut self.navigate_down,
            Action::NavigateLeft => &mut self.navigate_left,
            Action::NavigateRight => &mut self.navigate_right,
        }
    }

    /// Clamp both directional vectors to the unit circle
    pub fn normalize(&mut self) {
        math::clamp_to_unit(&mut self.directional_move);
        math::clamp_to_unit(&mut self.directional_alt);
    }

    /// Whether anything in this frame counts as deliberate input.
    ///
    /// Holding a non-repeatable button does not count; holding a navigation
    /// button counts only when it (would) auto-repeat.
    pub fn any_active(&self) -> bool {
        if !math::is_zero(&self.directional_move) || !math::is_zero(&self.directional_alt) {
            return true;
        }

        Action::ALL.iter().any(|&action| {
            let state = self.button(action);
            if action.is_repeatable() {
                state.is_triggered()
            } else {
                state.is_just_pressed()
            }
        })
    }

    /// Clear transient state, keeping input memory such as the last device
    pub fn reset(&mut self) {
        *self = Self {
            last_keynav_device: self.last_keynav_device,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_button_state_from_edges() {
        assert_eq!(ButtonState::from_edges(false, false), ButtonState::Up);
        assert_eq!(ButtonState::from_edges(false, true), ButtonState::Up);
        assert_eq!(ButtonState::from_edges(true, false), ButtonState::Down);
        assert_eq!(ButtonState::from_edges(true, true), ButtonState::Held);
    }

    #[test]
    fn test_reset_keeps_device_memory() {
        let mut state = InputActionStates::new();
        state.last_keynav_device = Device::Gamepad;
        state.directional_move = Vec2::new(0.5, 0.0);
        state.directional_alt = Vec2::new(0.0, -1.0);
        state.serve_ball = ButtonState::Held;
        state.navigate_left = ButtonState::Down;

        state.reset();

        assert_eq!(state.last_keynav_device, Device::Gamepad);
        assert_eq!(state.directional_move, Vec2::zeros());
        assert_eq!(state.directional_alt, Vec2::zeros());
        for action in Action::ALL {
            assert_eq!(state.button(action), ButtonState::Up);
        }
    }

    #[test]
    fn test_normalize_applies_to_both_vectors() {
        let mut state = InputActionStates::new();
        state.directional_move = Vec2::new(1.0, -1.0);
        state.directional_alt = Vec2::new(0.6, 0.0);

        state.normalize();

        assert_relative_eq!(state.directional_move.magnitude(), 1.0, epsilon = 1e-6);
        assert_eq!(state.directional_alt, Vec2::new(0.6, 0.0));
    }

    #[test]
    fn test_any_active_rules() {
        let mut state = InputActionStates::new();
        assert!(!state.any_active());

        state.serve_ball = ButtonState::Held;
        assert!(!state.any_active(), "held non-repeatable button is not activity");

        state.serve_ball = ButtonState::Down;
        assert!(state.any_active());

        state.reset();
        state.navigate_up = ButtonState::Held;
        assert!(!state.any_active());
        state.navigate_up = ButtonState::AutoRepeat;
        assert!(state.any_active());

        state.reset();
        state.directional_alt = Vec2::new(0.0, 0.2);
        assert!(state.any_active());
    }

    #[test]
    fn test_button_mut_writes_through() {
        let mut state = InputActionStates::new();
        *state.button_mut(Action::PageDown) = ButtonState::Down;
        assert_eq!(state.page_down, ButtonState::Down);
        assert!(Action::NavigateRight.is_repeatable());
        assert!(!Action::Cancel.is_repeatable());
    }
}
