//! Core key and observer types shared by the oxline crates.
//!
//! Two concerns live here:
//! - The logical key model (`KeyToken`, `NamedKey`, `ModMask`, `KeyPress`) produced by the
//!   keypress decoder and consumed by the session dispatcher.
//! - `ObserverList`, the synchronous callback registry used for key observers and session
//!   event listeners. A failing observer never cancels the dispatch loop.

use std::fmt;
use std::time::Instant;

mod observer;
pub use observer::{Observer, ObserverError, ObserverId, ObserverList};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u8 { const CTRL=1; const ALT=2; const SHIFT=4; }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Carriage return (`\r`).
    Return,
    /// Line feed (`\n`).
    Enter,
    Esc,
    Backspace,
    Tab,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Clear,
    /// A well-formed control sequence with no entry in the key table.
    Unknown,
}

/// Canonical logical key tokens.
///
/// `KeyToken::Chord` wraps a base token plus modifier mask so consumers can
/// reconstruct combinations such as `<C-a>` or `<A-b>` without inspecting
/// raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Named(NamedKey),
    Chord { base: Box<KeyToken>, mods: ModMask },
}

impl KeyToken {
    /// Build a chord, collapsing to the base token when `mods` is empty.
    pub fn chord(base: KeyToken, mods: ModMask) -> Self {
        if mods.is_empty() {
            return base;
        }
        match base {
            KeyToken::Chord {
                base: inner,
                mods: inner_mods,
            } => KeyToken::Chord {
                base: inner,
                mods: inner_mods | mods,
            },
            other => KeyToken::Chord {
                base: Box::new(other),
                mods,
            },
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self::chord(KeyToken::Char(c), ModMask::CTRL)
    }

    pub fn alt(c: char) -> Self {
        Self::chord(KeyToken::Char(c), ModMask::ALT)
    }

    /// Modifier mask (empty for plain tokens).
    pub fn mods(&self) -> ModMask {
        match self {
            KeyToken::Chord { mods, .. } => *mods,
            _ => ModMask::empty(),
        }
    }

    /// Token with modifiers removed.
    pub fn base(&self) -> &KeyToken {
        match self {
            KeyToken::Chord { base, .. } => base.base(),
            other => other,
        }
    }

    /// Stable discriminant label for logging (never the key payload).
    pub fn kind_label(&self) -> &'static str {
        match self {
            KeyToken::Char(_) => "char",
            KeyToken::Named(_) => "named",
            KeyToken::Chord { .. } => "chord",
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{}", c.escape_debug()),
            KeyToken::Named(n) => write!(f, "<{n:?}>"),
            KeyToken::Chord { base, mods } => {
                if mods.contains(ModMask::CTRL) {
                    f.write_str("C-")?;
                }
                if mods.contains(ModMask::ALT) {
                    f.write_str("A-")?;
                }
                if mods.contains(ModMask::SHIFT) {
                    f.write_str("S-")?;
                }
                write!(f, "{base}")
            }
        }
    }
}

/// A decoded key press.
///
/// Fields:
/// * `token`: logical key identity.
/// * `sequence`: the raw characters that produced the token (a single char for
///   printable input, the full escape sequence for special keys). Never logged.
/// * `timestamp`: instant at which the decoder resolved the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub token: KeyToken,
    pub sequence: String,
    pub timestamp: Instant,
}

impl KeyPress {
    /// Create a `KeyPress` stamped with the current instant.
    pub fn new(token: KeyToken, sequence: impl Into<String>) -> Self {
        Self::from_parts(token, sequence, Instant::now())
    }

    /// Create a `KeyPress` with caller supplied timestamp (decoder and tests).
    pub fn from_parts(token: KeyToken, sequence: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            token,
            sequence: sequence.into(),
            timestamp,
        }
    }

    /// Printable character carried by an unmodified `Char` token.
    pub fn printable(&self) -> Option<char> {
        match self.token {
            KeyToken::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}
