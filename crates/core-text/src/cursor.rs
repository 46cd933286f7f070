//! Cursor position math for prompt + buffer redraw.
//!
//! Rows are counted from explicit newlines. When a terminal width is known
//! (`Layout::columns`), long rows additionally wrap at that width and a wide
//! glyph never straddles the right edge; without it no wrapping is assumed.

use crate::ansi::strip_control_sequences;
use crate::width::char_width;

/// Zero-based (row, column) relative to the start of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPos {
    pub row: usize,
    pub col: usize,
}

impl DisplayPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Tab stop interval; must be at least 1.
    pub tab_size: usize,
    /// Terminal width in cells, if known.
    pub columns: Option<usize>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tab_size: 8,
            columns: None,
        }
    }
}

/// Position just past the last cell of `text`.
pub fn display_pos(text: &str, layout: &Layout) -> DisplayPos {
    let visible = strip_control_sequences(text);
    let tab = layout.tab_size.max(1);
    let width = layout.columns.filter(|w| *w > 0);

    let mut offset = 0usize;
    let mut row = 0usize;
    for ch in visible.chars() {
        match ch {
            '\n' => {
                // A newline always advances at least one row, plus any rows the
                // wrapped line already consumed.
                row += match width {
                    Some(w) => offset.div_ceil(w).max(1),
                    None => 1,
                };
                offset = 0;
            }
            '\t' => offset += tab - (offset % tab),
            _ => match char_width(ch) {
                2 => {
                    if let Some(w) = width
                        && (offset + 1) % w == 0
                    {
                        offset += 1;
                    }
                    offset += 2;
                }
                n => offset += n,
            },
        }
    }

    match width {
        Some(w) => {
            let col = offset % w;
            DisplayPos::new(row + (offset - col) / w, col)
        }
        None => DisplayPos::new(row, offset),
    }
}

/// Cursor position for `prompt` followed by the buffer text before the cursor,
/// using the default layout (8-column tabs, no width wrapping).
pub fn cursor_position(prompt: &str, before_cursor: &str) -> DisplayPos {
    cursor_position_with(prompt, before_cursor, &Layout::default())
}

pub fn cursor_position_with(prompt: &str, before_cursor: &str, layout: &Layout) -> DisplayPos {
    let mut joined = String::with_capacity(prompt.len() + before_cursor.len());
    joined.push_str(prompt);
    joined.push_str(before_cursor);
    display_pos(&joined, layout)
}
