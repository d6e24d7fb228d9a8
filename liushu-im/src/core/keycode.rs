//! Key code definitions and key event handling

use std::fmt;

/// Key symbol (keysym) values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keysym(pub u32);

impl Keysym {
    // Common key symbols (XKB keysym values)
    pub const BACKSPACE: Keysym = Keysym(0xff08);
    pub const TAB: Keysym = Keysym(0xff09);
    pub const RETURN: Keysym = Keysym(0xff0d);
    pub const KP_ENTER: Keysym = Keysym(0xff8d);
    pub const ESCAPE: Keysym = Keysym(0xff1b);
    pub const DELETE: Keysym = Keysym(0xffff);

    // Modifiers
    pub const SHIFT_L: Keysym = Keysym(0xffe1);
    pub const SHIFT_R: Keysym = Keysym(0xffe2);

    // Punctuation
    pub const SPACE: Keysym = Keysym(0x0020);
    pub const COMMA: Keysym = Keysym(0x002c);
    pub const PERIOD: Keysym = Keysym(0x002e);

    /// Check if this keysym represents a printable character
    pub fn is_printable(&self) -> bool {
        // ASCII printable range (0x20-0x7e)
        (0x0020..=0x007e).contains(&self.0)
    }

    /// Try to convert this keysym to a character
    pub fn to_char(&self) -> Option<char> {
        if self.is_printable() {
            char::from_u32(self.0)
        } else {
            None
        }
    }

    /// Check if this is a shift key
    pub fn is_shift(&self) -> bool {
        matches!(*self, Self::SHIFT_L | Self::SHIFT_R)
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.to_char() {
            write!(f, "{}", ch)
        } else {
            write!(f, "Keysym(0x{:04x})", self.0)
        }
    }
}

/// A key event delivered by the keyboard UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A letter key
    Alpha(char),
    /// Text committed verbatim (digits, symbols, emoji)
    RawText(String),
    /// Toggle between composition and direct ASCII input
    AsciiModeSwitch,
    Enter,
    Delete,
    Shift,
    Comma,
    Space,
    Period,
    /// Switch to the symbols layout
    Symbols,
    /// Switch to the emoji layout
    Emoji,
    /// Switch back to the letter layout
    Abc,
    /// Anything the engine does not handle
    Other,
}

impl KeyEvent {
    /// Translate a raw key press into a key event.
    ///
    /// `shift` is the state of the Shift modifier; Shift+letter yields the
    /// upper-case letter so hosts that do not resolve Shift into the keysym
    /// behave like those that do.
    pub fn from_keysym(keysym: Keysym, shift: bool) -> Self {
        match keysym {
            Keysym::RETURN | Keysym::KP_ENTER => return Self::Enter,
            Keysym::BACKSPACE => return Self::Delete,
            Keysym::SPACE => return Self::Space,
            Keysym::COMMA => return Self::Comma,
            Keysym::PERIOD => return Self::Period,
            k if k.is_shift() => return Self::Shift,
            _ => {}
        }

        match keysym.to_char() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                if shift {
                    Self::Alpha(ch.to_ascii_uppercase())
                } else {
                    Self::Alpha(ch)
                }
            }
            Some(ch) => Self::RawText(ch.to_string()),
            None => Self::Other,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha(c) => write!(f, "Alpha({})", c),
            Self::RawText(s) => write!(f, "RawText({:?})", s),
            other => write!(f, "{:?}", other),
        }
    }
}
