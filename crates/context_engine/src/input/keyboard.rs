//! Keyboard capability

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
    /// Home
    Home,
    /// End
    End,
    /// Left Shift
    LeftShift,
    /// Right Shift
    RightShift,
    /// Left Control
    LeftControl,
    /// Right Control
    RightControl,
    /// Left Alt
    LeftAlt,
    /// Right Alt
    RightAlt,
    /// Left Super / Windows / Command
    LeftSuper,
    /// Right Super / Windows / Command
    RightSuper,
}

impl KeyCode {
    /// Every key the core knows about, used to snapshot "everything held"
    pub const ALL: &'static [KeyCode] = &[
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F,
        KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L,
        KeyCode::M, KeyCode::N, KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R,
        KeyCode::S, KeyCode::T, KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X,
        KeyCode::Y, KeyCode::Z,
        KeyCode::Space, KeyCode::Enter, KeyCode::Escape, KeyCode::Tab, KeyCode::Backspace,
        KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right,
        KeyCode::PageUp, KeyCode::PageDown, KeyCode::Home, KeyCode::End,
        KeyCode::LeftShift, KeyCode::RightShift,
        KeyCode::LeftControl, KeyCode::RightControl,
        KeyCode::LeftAlt, KeyCode::RightAlt,
        KeyCode::LeftSuper, KeyCode::RightSuper,
    ];

    /// Modifier flag this key contributes, if it is a modifier
    pub fn modifier(self) -> Option<Modifiers> {
        match self {
            KeyCode::LeftShift | KeyCode::RightShift => Some(Modifiers::SHIFT),
            KeyCode::LeftControl | KeyCode::RightControl => Some(Modifiers::CONTROL),
            KeyCode::LeftAlt | KeyCode::RightAlt => Some(Modifiers::ALT),
            KeyCode::LeftSuper | KeyCode::RightSuper => Some(Modifiers::SUPER),
            _ => None,
        }
    }
}

bitflags! {
    /// Held modifier keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift
        const SHIFT = 0b0001;
        /// Either Control
        const CONTROL = 0b0010;
        /// Either Alt
        const ALT = 0b0100;
        /// Either Super
        const SUPER = 0b1000;
    }
}

/// Raw keyboard state supplied by the host's window layer
pub trait KeyboardDevice {
    /// Whether the window currently has input focus
    fn is_focused(&self) -> bool;

    /// Whether `key` is physically down right now
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Held modifier keys
    fn modifiers(&self) -> Modifiers;
}

/// In-memory keyboard the host writes raw key events into.
///
/// Window backends forward press/release events here; tests and scripted
/// runs set the held keys directly.
#[derive(Debug, Clone)]
pub struct VirtualKeyboard {
    focused: bool,
    down: HashSet<KeyCode>,
}

impl VirtualKeyboard {
    /// Create a focused keyboard with nothing held
    pub fn new() -> Self {
        Self {
            focused: true,
            down: HashSet::new(),
        }
    }

    /// Mark a key as held
    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Apply a key event
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Replace the whole held set
    pub fn set_held_keys(&mut self, keys: impl IntoIterator<Item = KeyCode>) {
        self.down = keys.into_iter().collect();
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.down.clear();
    }

    /// Set window focus
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Default for VirtualKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardDevice for VirtualKeyboard {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    fn modifiers(&self) -> Modifiers {
        self.down
            .iter()
            .filter_map(|key| key.modifier())
            .fold(Modifiers::empty(), |acc, flag| acc | flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_are_unique() {
        let unique: HashSet<_> = KeyCode::ALL.iter().collect();
        assert_eq!(unique.len(), KeyCode::ALL.len());
    }

    #[test]
    fn test_press_and_release() {
        let mut keyboard = VirtualKeyboard::new();
        keyboard.press(KeyCode::Space);
        assert!(keyboard.is_key_down(KeyCode::Space));

        keyboard.handle_key_input(KeyCode::Space, false);
        assert!(!keyboard.is_key_down(KeyCode::Space));
    }

    #[test]
    fn test_modifiers_follow_held_keys() {
        let mut keyboard = VirtualKeyboard::new();
        assert!(keyboard.modifiers().is_empty());

        keyboard.set_held_keys([KeyCode::RightShift, KeyCode::LeftControl, KeyCode::A]);
        assert_eq!(keyboard.modifiers(), Modifiers::SHIFT | Modifiers::CONTROL);

        keyboard.release_all();
        assert!(keyboard.modifiers().is_empty());
    }
}
