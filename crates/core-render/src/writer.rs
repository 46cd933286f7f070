//! Terminal command buffer.
//!
//! Commands are collected in order and rendered in one pass by `flush_to`,
//! which queues crossterm commands on any `Write` sink and flushes once.
//! Adjacent prints are merged so a refresh usually emits a single `Print`.

use anyhow::Result;
use crossterm::{
    cursor::{MoveTo, MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor up this many rows (never zero).
    MoveUp(u16),
    /// Absolute, 0-based column on the current row.
    MoveToColumn(u16),
    /// Erase from the cursor to the end of the screen.
    ClearBelow,
    /// Home the cursor and erase the whole screen.
    ClearScreen,
    Print(String),
}

#[derive(Debug, Default, Clone)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_up(&mut self, rows: u16) {
        if rows > 0 {
            self.cmds.push(Command::MoveUp(rows));
        }
    }

    pub fn move_to_column(&mut self, col: u16) {
        self.cmds.push(Command::MoveToColumn(col));
    }

    pub fn clear_below(&mut self) {
        self.cmds.push(Command::ClearBelow);
    }

    pub fn clear_screen(&mut self) {
        self.cmds.push(Command::ClearScreen);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if s.is_empty() {
            return;
        }
        if let Some(Command::Print(prev)) = self.cmds.last_mut() {
            prev.push_str(&s);
        } else {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn push(&mut self, cmd: Command) {
        match cmd {
            Command::MoveUp(n) => self.move_up(n),
            Command::Print(s) => self.print(s),
            other => self.cmds.push(other),
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Render every command to `out` and flush it.
    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        let count = self.cmds.len();
        for c in self.cmds {
            match c {
                Command::MoveUp(n) => {
                    queue!(out, MoveUp(n))?;
                }
                Command::MoveToColumn(col) => {
                    queue!(out, MoveToColumn(col))?;
                }
                Command::ClearBelow => {
                    queue!(out, Clear(ClearType::FromCursorDown))?;
                }
                Command::ClearScreen => {
                    queue!(out, MoveTo(0, 0), Clear(ClearType::FromCursorDown))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        out.flush()?;
        trace!(target: "render", commands = count, "writer_flushed");
        Ok(())
    }
}
