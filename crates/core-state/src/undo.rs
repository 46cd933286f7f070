use std::collections::VecDeque;

use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 2048;

/// Full-line snapshot for undo/redo. Lines are short, so whole clones are
/// cheaper than diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSnapshot {
    pub text: Vec<char>,
    pub cursor: usize,
}

#[derive(Debug, Default, Clone)]
pub struct UndoEngine {
    undo_stack: VecDeque<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    snapshots_skipped: u64,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Snapshots dropped because they matched the previous one.
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Record the state before an edit. A new edit invalidates the redo stack.
    pub fn push_snapshot(&mut self, text: &[char], cursor: usize) {
        if let Some(last) = self.undo_stack.back()
            && last.cursor == cursor
            && last.text == text
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push_back(EditSnapshot {
            text: text.to_vec(),
            cursor,
        });
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        trace!(
            target: "state.undo",
            undo_depth = self.undo_stack.len(),
            chars = text.len(),
            "push_snapshot"
        );
    }

    pub fn undo(&mut self, text: &mut Vec<char>, cursor: &mut usize) -> bool {
        let Some(last) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(EditSnapshot {
            text: std::mem::replace(text, last.text),
            cursor: std::mem::replace(cursor, last.cursor),
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        true
    }

    pub fn redo(&mut self, text: &mut Vec<char>, cursor: &mut usize) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(EditSnapshot {
            text: std::mem::replace(text, next.text),
            cursor: std::mem::replace(cursor, next.cursor),
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
