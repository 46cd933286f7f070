//! Key token to edit action translation.
//!
//! Stateless: everything that depends on session state (whether the line is
//! empty for Ctrl-D, whether the previous key was Tab) is decided by the
//! session when it applies the action.

use core_events::{KeyToken, ModMask, NamedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    DeleteLeft,
    DeleteRight,
    /// Ctrl-D: delete right, or close on an empty line.
    DeleteRightOrEof,
    MoveLeft,
    MoveRight,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    DeleteWordLeft,
    DeleteWordRight,
    DeleteLineLeft,
    DeleteLineRight,
    Yank,
    YankPop,
    Undo,
    Redo,
    /// `substring` is set for bare Up/Down, which search by the text before
    /// the cursor; Ctrl-P/Ctrl-N walk every entry.
    HistoryPrev { substring: bool },
    HistoryNext { substring: bool },
    Complete,
    ClearScreen,
    Interrupt,
    Suspend,
}

impl Action {
    /// Stable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Insert(_) => "insert",
            Action::DeleteLeft => "delete_left",
            Action::DeleteRight => "delete_right",
            Action::DeleteRightOrEof => "delete_right_or_eof",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::LineStart => "line_start",
            Action::LineEnd => "line_end",
            Action::WordLeft => "word_left",
            Action::WordRight => "word_right",
            Action::DeleteWordLeft => "delete_word_left",
            Action::DeleteWordRight => "delete_word_right",
            Action::DeleteLineLeft => "delete_line_left",
            Action::DeleteLineRight => "delete_line_right",
            Action::Yank => "yank",
            Action::YankPop => "yank_pop",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::HistoryPrev { .. } => "history_prev",
            Action::HistoryNext { .. } => "history_next",
            Action::Complete => "complete",
            Action::ClearScreen => "clear_screen",
            Action::Interrupt => "interrupt",
            Action::Suspend => "suspend",
        }
    }

    pub fn is_history_search(&self) -> bool {
        matches!(
            self,
            Action::HistoryPrev { substring: true } | Action::HistoryNext { substring: true }
        )
    }

    pub fn is_history(&self) -> bool {
        matches!(self, Action::HistoryPrev { .. } | Action::HistoryNext { .. })
    }
}

/// Map a decoded key to an action. `None` means the key has no editing
/// effect (Esc, Return/Enter, unbound chords and function keys).
pub fn translate(token: &KeyToken, completion_enabled: bool) -> Option<Action> {
    let mods = token.mods();
    let base = token.base();

    if mods == ModMask::CTRL | ModMask::SHIFT {
        return match base {
            KeyToken::Named(NamedKey::Backspace) => Some(Action::DeleteLineLeft),
            KeyToken::Named(NamedKey::Delete) => Some(Action::DeleteLineRight),
            _ => None,
        };
    }

    if mods == ModMask::CTRL {
        return match base {
            KeyToken::Char(c) => ctrl_char(*c),
            KeyToken::Named(NamedKey::Backspace) => Some(Action::DeleteWordLeft),
            KeyToken::Named(NamedKey::Delete) => Some(Action::DeleteWordRight),
            KeyToken::Named(NamedKey::Left) => Some(Action::WordLeft),
            KeyToken::Named(NamedKey::Right) => Some(Action::WordRight),
            _ => None,
        };
    }

    if mods == ModMask::ALT {
        return match base {
            KeyToken::Char('b') => Some(Action::WordLeft),
            KeyToken::Char('f') => Some(Action::WordRight),
            KeyToken::Char('d') | KeyToken::Named(NamedKey::Delete) => {
                Some(Action::DeleteWordRight)
            }
            KeyToken::Named(NamedKey::Backspace) => Some(Action::DeleteWordLeft),
            KeyToken::Char('y') => Some(Action::YankPop),
            _ => None,
        };
    }

    if !mods.is_empty() {
        return None;
    }

    match base {
        KeyToken::Char(c) if !c.is_control() => Some(Action::Insert(*c)),
        KeyToken::Char(_) => None,
        KeyToken::Named(named) => match named {
            NamedKey::Backspace => Some(Action::DeleteLeft),
            NamedKey::Delete => Some(Action::DeleteRight),
            NamedKey::Left => Some(Action::MoveLeft),
            NamedKey::Right => Some(Action::MoveRight),
            NamedKey::Home => Some(Action::LineStart),
            NamedKey::End => Some(Action::LineEnd),
            NamedKey::Up => Some(Action::HistoryPrev { substring: true }),
            NamedKey::Down => Some(Action::HistoryNext { substring: true }),
            NamedKey::Tab if completion_enabled => Some(Action::Complete),
            NamedKey::Tab => Some(Action::Insert('\t')),
            _ => None,
        },
        KeyToken::Chord { .. } => None,
    }
}

fn ctrl_char(c: char) -> Option<Action> {
    let action = match c {
        'a' => Action::LineStart,
        'e' => Action::LineEnd,
        'b' => Action::MoveLeft,
        'f' => Action::MoveRight,
        'h' => Action::DeleteLeft,
        'd' => Action::DeleteRightOrEof,
        'u' => Action::DeleteLineLeft,
        'k' => Action::DeleteLineRight,
        'w' => Action::DeleteWordLeft,
        'n' => Action::HistoryNext { substring: false },
        'p' => Action::HistoryPrev { substring: false },
        'y' => Action::Yank,
        'l' => Action::ClearScreen,
        'c' => Action::Interrupt,
        'z' => Action::Suspend,
        '_' => Action::Undo,
        '^' => Action::Redo,
        _ => return None,
    };
    Some(action)
}
