//! Redraw of the prompt and edit line.
//!
//! A refresh walks back up to the first row the previous draw occupied,
//! clears everything below, reprints prompt and line, then parks the cursor
//! at its display position. `prev_rows` is the cursor row of the previous
//! draw; the caller stores `Refresh::cursor.row` for the next one.

use core_text::DisplayPos;
use std::io::Write;

use crate::writer::{Command, Writer};

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Everything needed to redraw one line edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Refresh {
    pub prompt: String,
    pub line: String,
    /// Cursor position measured over prompt + text before the cursor.
    pub cursor: DisplayPos,
    /// Position after prompt + the whole line.
    pub end: DisplayPos,
    pub prev_rows: usize,
    /// Home and clear the screen before drawing (Ctrl-L).
    pub clear_screen: bool,
}

impl Refresh {
    pub fn plan(&self) -> RefreshPlan {
        let mut plan = RefreshPlan::build(
            &self.prompt,
            &self.line,
            self.cursor,
            self.end,
            if self.clear_screen { 0 } else { self.prev_rows },
        );
        if self.clear_screen {
            plan.commands.insert(0, Command::ClearScreen);
        }
        plan
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        self.plan().flush_to(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPlan {
    commands: Vec<Command>,
}

impl RefreshPlan {
    pub fn build(
        prompt: &str,
        line: &str,
        cursor_pos: DisplayPos,
        end_pos: DisplayPos,
        prev_rows: usize,
    ) -> Self {
        let mut w = Writer::new();
        w.move_up(to_u16(prev_rows));
        w.move_to_column(0);
        w.clear_below();
        w.print(prompt);
        w.print(line);
        // Force the terminal to allocate the row the cursor lands on.
        if end_pos.col == 0 {
            w.print(" ");
        }
        w.move_to_column(to_u16(cursor_pos.col));
        w.move_up(to_u16(end_pos.row.saturating_sub(cursor_pos.row)));
        Self {
            commands: w.commands().to_vec(),
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_writer(self) -> Writer {
        let mut w = Writer::new();
        for c in self.commands {
            w.push(c);
        }
        w
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> anyhow::Result<()> {
        self.into_writer().flush_to(out)
    }
}
