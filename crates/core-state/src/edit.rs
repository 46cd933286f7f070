//! The current, uncommitted line.
//!
//! `text` holds scalar values and `cursor` is an index into it with
//! `0 <= cursor <= text.len()` after every operation. Each mutating operation
//! snapshots the previous state for undo first; operations that change nothing
//! leave the undo history alone.

use core_text::motion;
use tracing::{debug, trace};

use crate::completion::{Completer, CompletionError, CompletionOutcome, common_prefix};
use crate::kill_ring::KillRing;
use crate::undo::UndoEngine;

#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
    text: Vec<char>,
    cursor: usize,
    undo: UndoEngine,
    kill_ring: KillRing,
    /// Length of the text inserted by the last yank while yank-pop may still
    /// replace it.
    yanked: Option<usize>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn line(&self) -> String {
        self.text.iter().collect()
    }

    pub fn before_cursor(&self) -> String {
        self.text[..self.cursor].iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn kill_ring(&self) -> &KillRing {
        &self.kill_ring
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    fn before_edit(&mut self) {
        self.undo.push_snapshot(&self.text, self.cursor);
    }

    fn splice(&mut self, start: usize, end: usize, with: &[char]) {
        self.text.splice(start..end, with.iter().copied());
        self.cursor = start + with.len();
    }

    pub fn insert(&mut self, c: char) {
        self.before_edit();
        self.text.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.before_edit();
        let chars: Vec<char> = s.chars().collect();
        self.splice(self.cursor, self.cursor, &chars);
    }

    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.before_edit();
        self.cursor -= 1;
        self.text.remove(self.cursor);
        true
    }

    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.before_edit();
        self.text.remove(self.cursor);
        true
    }

    /// Move by `delta` scalar values, clamped to the buffer. Returns whether
    /// the cursor moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.text.len());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.text.len();
        self.cursor = self.text.len();
        moved
    }

    pub fn word_left(&mut self) -> bool {
        let n = motion::word_left_len(&self.text[..self.cursor]);
        self.cursor -= n;
        n > 0
    }

    pub fn word_right(&mut self) -> bool {
        let n = motion::word_right_len(&self.text[self.cursor..]);
        self.cursor += n;
        n > 0
    }

    pub fn delete_word_left(&mut self) -> bool {
        let n = motion::word_left_len(&self.text[..self.cursor]);
        if n == 0 {
            return false;
        }
        self.before_edit();
        let start = self.cursor - n;
        self.splice(start, self.cursor, &[]);
        true
    }

    pub fn delete_word_right(&mut self) -> bool {
        let n = motion::delete_word_right_len(&self.text[self.cursor..]);
        if n == 0 {
            return false;
        }
        self.before_edit();
        self.text.drain(self.cursor..self.cursor + n);
        true
    }

    /// Kill from the start of the line to the cursor.
    pub fn delete_line_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.before_edit();
        let killed: String = self.text.drain(..self.cursor).collect();
        self.cursor = 0;
        self.kill_ring.push(killed);
        true
    }

    /// Kill from the cursor to the end of the line.
    pub fn delete_line_right(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.before_edit();
        let killed: String = self.text.drain(self.cursor..).collect();
        self.kill_ring.push(killed);
        true
    }

    /// Insert the newest kill. Yank-pop may replace it until
    /// [`EditBuffer::break_yank`].
    pub fn yank(&mut self) -> bool {
        let Some(entry) = self.kill_ring.current().map(str::to_owned) else {
            return false;
        };
        self.insert_str(&entry);
        self.yanked = Some(entry.chars().count());
        trace!(target: "state.edit", chars = self.yanked, "yank");
        true
    }

    /// Replace the text just yanked with the next older kill.
    pub fn yank_pop(&mut self) -> bool {
        let Some(last_len) = self.yanked else {
            return false;
        };
        let Some(next) = self.kill_ring.rotate().map(str::to_owned) else {
            return false;
        };
        self.before_edit();
        let start = self.cursor.saturating_sub(last_len);
        let chars: Vec<char> = next.chars().collect();
        self.splice(start, self.cursor, &chars);
        self.yanked = Some(chars.len());
        trace!(target: "state.edit", chars = chars.len(), "yank_pop");
        true
    }

    /// Any key other than yank / yank-pop ends the yank window.
    pub fn break_yank(&mut self) {
        self.yanked = None;
    }

    pub fn undo(&mut self) -> bool {
        self.yanked = None;
        self.undo.undo(&mut self.text, &mut self.cursor)
    }

    pub fn redo(&mut self) -> bool {
        self.yanked = None;
        self.undo.redo(&mut self.text, &mut self.cursor)
    }

    /// Replace the whole buffer (history recall); cursor moves to the end.
    pub fn replace(&mut self, text: &str) {
        self.before_edit();
        self.text = text.chars().collect();
        self.cursor = self.text.len();
    }

    /// Take the line and reset to empty. Undo history does not survive a
    /// commit.
    pub fn commit(&mut self) -> String {
        let line: String = self.text.drain(..).collect();
        self.cursor = 0;
        self.yanked = None;
        self.undo.clear();
        trace!(target: "state.edit", chars = line.chars().count(), "commit");
        line
    }

    /// Discard the line without producing it.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.yanked = None;
        self.undo.clear();
    }

    /// Ask `completer` about the text before the cursor and splice its answer.
    ///
    /// With `c` the common prefix of the non-empty candidates and `m` the
    /// matched text: if `c` extends `m` the remainder is inserted; if `m` does
    /// not start with `c`, the last `m.len()` chars before the cursor become
    /// `c`; otherwise a second consecutive Tab lists the candidates. A failing
    /// completer leaves the buffer untouched. A `replace_prefix` answer skips
    /// these rules and swaps the whole text before the cursor for its value.
    pub fn request_completion(
        &mut self,
        completer: &mut dyn Completer,
        last_was_tab: bool,
    ) -> Result<CompletionOutcome, CompletionError> {
        let prefix = self.before_cursor();
        let completion = completer.complete(&prefix)?;
        if completion.replace_prefix {
            return Ok(self.replace_before_cursor(&prefix, completion.candidates));
        }
        if completion.candidates.is_empty() {
            debug!(target: "state.edit", "completion_empty");
            return Ok(CompletionOutcome::NoCandidates);
        }

        let common = common_prefix(&completion.candidates);
        let matched = completion.matched.as_str();
        let outcome = if common.len() > matched.len() && common.starts_with(matched) {
            self.insert_str(&common[matched.len()..]);
            CompletionOutcome::Extended
        } else if !matched.starts_with(common.as_str()) {
            self.before_edit();
            let start = self.cursor.saturating_sub(matched.chars().count());
            let chars: Vec<char> = common.chars().collect();
            self.splice(start, self.cursor, &chars);
            CompletionOutcome::Replaced
        } else if last_was_tab {
            CompletionOutcome::Listing(completion.candidates)
        } else {
            CompletionOutcome::Unchanged
        };
        debug!(
            target: "state.edit",
            outcome = outcome_label(&outcome),
            "completion_applied"
        );
        Ok(outcome)
    }

    fn replace_before_cursor(
        &mut self,
        prefix: &str,
        candidates: Vec<String>,
    ) -> CompletionOutcome {
        let value = candidates.into_iter().next().unwrap_or_default();
        let outcome = if value == prefix {
            CompletionOutcome::Unchanged
        } else {
            self.before_edit();
            let chars: Vec<char> = value.chars().collect();
            self.splice(0, self.cursor, &chars);
            CompletionOutcome::Replaced
        };
        debug!(
            target: "state.edit",
            outcome = outcome_label(&outcome),
            replaced_len = prefix.len(),
            value_len = value.len(),
            "completion_prefix_replaced"
        );
        outcome
    }
}

fn outcome_label(outcome: &CompletionOutcome) -> &'static str {
    match outcome {
        CompletionOutcome::NoCandidates => "no_candidates",
        CompletionOutcome::Extended => "extended",
        CompletionOutcome::Replaced => "replaced",
        CompletionOutcome::Listing(_) => "listing",
        CompletionOutcome::Unchanged => "unchanged",
    }
}
