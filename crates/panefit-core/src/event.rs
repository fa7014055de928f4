#![forbid(unsafe_code)]

//! Key events delivered to text inputs.
//!
//! Only the parts a submit policy needs are modelled: the key, held
//! modifiers, whether an IME composition is in progress, and whether an
//! earlier handler already consumed the event.

use bitflags::bitflags;

/// A keyboard event targeted at a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// An input method composition session is active.
    pub composing: bool,

    /// A previous handler marked the event as handled.
    pub handled: bool,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            composing: false,
            handled: false,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as part of an IME composition.
    #[must_use]
    pub const fn composing(mut self, composing: bool) -> Self {
        self.composing = composing;
        self
    }

    /// Mark the event as already handled.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Whether any modifier is held.
    #[must_use]
    pub const fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes a text input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Tab.
    Tab,
    /// Arrow keys.
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_has_no_modifiers() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert!(!key.has_modifiers());
        assert!(!key.composing);
        assert!(!key.handled);
    }

    #[test]
    fn modifier_queries() {
        let key = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(key.shift());
        assert!(key.ctrl());
        assert!(key.has_modifiers());
    }

    #[test]
    fn char_match() {
        let key = KeyEvent::new(KeyCode::Char('a'));
        assert!(key.is_char('a'));
        assert!(!key.is_char('b'));
    }

    #[test]
    fn mark_handled_sticks() {
        let mut key = KeyEvent::new(KeyCode::Enter);
        key.mark_handled();
        assert!(key.handled);
    }
}
