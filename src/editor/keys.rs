//! Key presses as the assistant sees them.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::Error;

/// The keys the assistant cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    /// Shift+Tab as reported by terminals.
    BackTab,
    Enter,
    Char(char),
    Other,
}

/// Modifier keys held during a press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// A key together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key pressed with Shift held.
    pub const fn shifted(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        };
        let modifiers = Modifiers {
            shift: event.modifiers.contains(KeyModifiers::SHIFT) || key == Key::BackTab,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        };
        Self { key, modifiers }
    }
}

/// Parses names like `tab`, `shift+tab`, `enter`, `ctrl+enter` or a
/// single character.
impl FromStr for KeyPress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownKey(s.to_string());
        let mut modifiers = Modifiers::NONE;

        // A lone "+" is a character, not a separator.
        let (mods, name) = match s.rsplit_once('+') {
            Some((mods, name)) if !name.is_empty() => (Some(mods), name),
            _ => (None, s),
        };
        for part in mods.into_iter().flat_map(|m| m.split('+')) {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                _ => return Err(unknown()),
            }
        }

        let key = match name.to_ascii_lowercase().as_str() {
            "tab" => Key::Tab,
            "backtab" => {
                modifiers.shift = true;
                Key::BackTab
            }
            "enter" | "return" => Key::Enter,
            "space" => Key::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(unknown()),
                }
            }
        };
        Ok(Self { key, modifiers })
    }
}
