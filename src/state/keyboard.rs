//! Keyboard event types.
//!
//! The engine never reads raw escape sequences. Key events arrive already
//! decoded, usually converted from crossterm with [`KeyEvent::from`].
//!
//! # Example
//!
//! ```
//! use spark_widgets::state::{KeyCode, KeyEvent, Modifiers};
//!
//! let tab = KeyEvent::new(KeyCode::Tab);
//! assert!(tab.is_press());
//!
//! let quit = KeyEvent::with_modifiers(KeyCode::Char('c'), Modifiers::ctrl());
//! assert!(quit.modifiers.ctrl);
//! ```

use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
            meta: mods.intersects(KeyModifiers::META | KeyModifiers::SUPER),
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Decoded key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    /// Shift+Tab.
    BackTab,
    Esc,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// Anything the engine has no name for.
    Unknown,
}

/// Keyboard event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    /// Create a simple key press event
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press (or auto-repeat) event
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }
}

// =============================================================================
// CROSSTERM CONVERSION
// =============================================================================

impl From<CrosstermKeyCode> for KeyCode {
    fn from(code: CrosstermKeyCode) -> Self {
        match code {
            CrosstermKeyCode::Char(c) => Self::Char(c),
            CrosstermKeyCode::Enter => Self::Enter,
            CrosstermKeyCode::Tab => Self::Tab,
            CrosstermKeyCode::BackTab => Self::BackTab,
            CrosstermKeyCode::Esc => Self::Esc,
            CrosstermKeyCode::Backspace => Self::Backspace,
            CrosstermKeyCode::Delete => Self::Delete,
            CrosstermKeyCode::Insert => Self::Insert,
            CrosstermKeyCode::Up => Self::Up,
            CrosstermKeyCode::Down => Self::Down,
            CrosstermKeyCode::Left => Self::Left,
            CrosstermKeyCode::Right => Self::Right,
            CrosstermKeyCode::Home => Self::Home,
            CrosstermKeyCode::End => Self::End,
            CrosstermKeyCode::PageUp => Self::PageUp,
            CrosstermKeyCode::PageDown => Self::PageDown,
            CrosstermKeyCode::F(n) => Self::F(n),
            _ => Self::Unknown,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        let state = match event.kind {
            KeyEventKind::Press => KeyState::Press,
            KeyEventKind::Repeat => KeyState::Repeat,
            KeyEventKind::Release => KeyState::Release,
        };

        Self {
            code: event.code.into(),
            modifiers: event.modifiers.into(),
            state,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn crossterm_key(code: CrosstermKeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_key_char() {
        let event = KeyEvent::from(crossterm_key(
            CrosstermKeyCode::Char('a'),
            KeyModifiers::empty(),
            KeyEventKind::Press,
        ));

        assert_eq!(event.code, KeyCode::Char('a'));
        assert_eq!(event.state, KeyState::Press);
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_convert_modifiers() {
        let event = KeyEvent::from(crossterm_key(
            CrosstermKeyCode::Char('c'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));

        assert!(event.modifiers.ctrl);
        assert!(event.modifiers.shift);
        assert!(!event.modifiers.alt);
    }

    #[test]
    fn test_convert_navigation_keys() {
        let keys = [
            (CrosstermKeyCode::Up, KeyCode::Up),
            (CrosstermKeyCode::Down, KeyCode::Down),
            (CrosstermKeyCode::PageUp, KeyCode::PageUp),
            (CrosstermKeyCode::End, KeyCode::End),
            (CrosstermKeyCode::BackTab, KeyCode::BackTab),
            (CrosstermKeyCode::F(5), KeyCode::F(5)),
            (CrosstermKeyCode::Null, KeyCode::Unknown),
        ];

        for (code, expected) in keys {
            assert_eq!(KeyCode::from(code), expected);
        }
    }

    #[test]
    fn test_release_is_not_press() {
        let event = KeyEvent::from(crossterm_key(
            CrosstermKeyCode::Enter,
            KeyModifiers::empty(),
            KeyEventKind::Release,
        ));
        assert!(!event.is_press());

        let mut repeat = KeyEvent::new(KeyCode::Enter);
        repeat.state = KeyState::Repeat;
        assert!(repeat.is_press());
    }
}
