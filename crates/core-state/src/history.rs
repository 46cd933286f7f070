//! Bounded line history with prefix-search navigation.
//!
//! Entries are stored most recent first. Navigation walks `Older` (towards the
//! end of the list) and `Newer` (towards index 0) over entries that start with
//! the search prefix captured when navigation began.

use std::collections::VecDeque;

use tracing::{debug, trace};

pub const DEFAULT_HISTORY_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Older,
    Newer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    #[default]
    Idle,
    At(usize),
}

/// Text a navigation step puts in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    Entry(String),
    /// Walked past the newest match: restore the search prefix.
    Draft(String),
}

impl Recall {
    pub fn text(&self) -> &str {
        match self {
            Recall::Entry(s) | Recall::Draft(s) => s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    capacity: usize,
    remove_duplicates: bool,
    cursor: HistoryCursor,
}

impl HistoryStore {
    pub fn new(capacity: usize, remove_duplicates: bool) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_SIZE)),
            capacity,
            remove_duplicates,
            cursor: HistoryCursor::Idle,
        }
    }

    /// Seed with existing entries (most recent first), truncated to capacity.
    pub fn with_entries(
        capacity: usize,
        remove_duplicates: bool,
        entries: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut store = Self::new(capacity, remove_duplicates);
        store.entries = entries.into_iter().take(capacity).collect();
        store
    }

    /// Record a committed line. Returns whether the history changed.
    pub fn record(&mut self, line: &str) -> bool {
        self.cursor = HistoryCursor::Idle;
        if self.capacity == 0 || line.trim().is_empty() {
            return false;
        }
        if self.entries.front().is_some_and(|newest| newest == line) {
            trace!(target: "state.history", "repeat_of_newest_skipped");
            return false;
        }
        if self.remove_duplicates
            && let Some(dup) = self.entries.iter().position(|e| e == line)
        {
            self.entries.remove(dup);
            trace!(target: "state.history", index = dup, "duplicate_removed");
        }
        self.entries.push_front(line.to_string());
        let mut evicted = 0usize;
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
            evicted += 1;
        }
        debug!(
            target: "state.history",
            len = self.entries.len(),
            evicted,
            "line_recorded"
        );
        true
    }

    /// Step through entries starting with `search`, skipping ones equal to
    /// `current`. Never wraps: stepping `Older` past the oldest match is a
    /// no-op, stepping `Newer` past the newest returns the draft and idles.
    pub fn navigate(
        &mut self,
        direction: NavDirection,
        search: &str,
        current: &str,
    ) -> Option<Recall> {
        let matches = |e: &String| e.starts_with(search) && e != current;
        match direction {
            NavDirection::Older => {
                let start = match self.cursor {
                    HistoryCursor::Idle => 0,
                    HistoryCursor::At(i) => i + 1,
                };
                let found = (start..self.entries.len()).find(|&i| matches(&self.entries[i]));
                let Some(index) = found else {
                    trace!(target: "state.history", "older_exhausted");
                    return None;
                };
                self.cursor = HistoryCursor::At(index);
                trace!(target: "state.history", index, "navigate_older");
                Some(Recall::Entry(self.entries[index].clone()))
            }
            NavDirection::Newer => {
                let HistoryCursor::At(at) = self.cursor else {
                    return None;
                };
                match (0..at).rev().find(|&i| matches(&self.entries[i])) {
                    Some(index) => {
                        self.cursor = HistoryCursor::At(index);
                        trace!(target: "state.history", index, "navigate_newer");
                        Some(Recall::Entry(self.entries[index].clone()))
                    }
                    None => {
                        self.cursor = HistoryCursor::Idle;
                        trace!(target: "state.history", "navigate_back_to_draft");
                        Some(Recall::Draft(search.to_string()))
                    }
                }
            }
        }
    }

    pub fn reset_navigation(&mut self) {
        self.cursor = HistoryCursor::Idle;
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(lines: &[&str]) -> HistoryStore {
        let mut h = HistoryStore::default();
        for l in lines {
            h.record(l);
        }
        h
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut h = HistoryStore::new(0, false);
        for i in 0..50 {
            assert!(!h.record(&format!("line {i}")));
        }
        assert!(h.is_empty());
        assert_eq!(h.navigate(NavDirection::Older, "", ""), None);
    }

    #[test]
    fn oldest_evicted_past_capacity() {
        let mut h = HistoryStore::default();
        for i in 0..31 {
            h.record(&format!("cmd {i}"));
        }
        assert_eq!(h.len(), 30);
        assert_eq!(h.entries().next(), Some("cmd 30"));
        assert_eq!(h.entries().last(), Some("cmd 1"));
    }

    #[test]
    fn blank_and_repeated_lines_skipped() {
        let h = store_with(&["a", "", "   ", "a", "b"]);
        assert_eq!(h.to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn remove_duplicates_moves_entry_to_front() {
        let mut h = HistoryStore::new(30, true);
        for l in ["a", "b", "a"] {
            h.record(l);
        }
        assert_eq!(h.to_vec(), vec!["a", "b"]);

        let mut keep = HistoryStore::new(30, false);
        for l in ["a", "b", "a"] {
            keep.record(l);
        }
        assert_eq!(keep.to_vec(), vec!["a", "b", "a"]);
    }

    #[test]
    fn older_then_newer_returns_to_draft() {
        let mut h = store_with(&["one", "two"]);
        assert_eq!(
            h.navigate(NavDirection::Older, "", ""),
            Some(Recall::Entry("two".into()))
        );
        assert_eq!(
            h.navigate(NavDirection::Older, "", "two"),
            Some(Recall::Entry("one".into()))
        );
        assert_eq!(h.navigate(NavDirection::Older, "", "one"), None);
        assert_eq!(h.cursor(), HistoryCursor::At(1));
        assert_eq!(
            h.navigate(NavDirection::Newer, "", "one"),
            Some(Recall::Entry("two".into()))
        );
        assert_eq!(
            h.navigate(NavDirection::Newer, "", "two"),
            Some(Recall::Draft(String::new()))
        );
        assert_eq!(h.cursor(), HistoryCursor::Idle);
        assert_eq!(h.navigate(NavDirection::Newer, "", ""), None);
    }

    #[test]
    fn prefix_search_skips_non_matching() {
        let mut h = store_with(&["git status", "ls", "git log", "cd /"]);
        assert_eq!(
            h.navigate(NavDirection::Older, "git", "git"),
            Some(Recall::Entry("git log".into()))
        );
        assert_eq!(
            h.navigate(NavDirection::Older, "git", "git log"),
            Some(Recall::Entry("git status".into()))
        );
        assert_eq!(
            h.navigate(NavDirection::Newer, "git", "git status"),
            Some(Recall::Entry("git log".into()))
        );
        assert_eq!(
            h.navigate(NavDirection::Newer, "git", "git log"),
            Some(Recall::Draft("git".into()))
        );
    }

    #[test]
    fn entry_equal_to_current_text_is_skipped() {
        let mut h = store_with(&["same", "other", "same"]);
        // Most recent first: ["same", "other", "same"]
        assert_eq!(
            h.navigate(NavDirection::Older, "", "same"),
            Some(Recall::Entry("other".into()))
        );
    }

    #[test]
    fn recording_resets_navigation() {
        let mut h = store_with(&["x"]);
        h.navigate(NavDirection::Older, "", "");
        assert_eq!(h.cursor(), HistoryCursor::At(0));
        h.record("y");
        assert_eq!(h.cursor(), HistoryCursor::Idle);
    }

    #[test]
    fn seeded_entries_truncate_to_capacity() {
        let h = HistoryStore::with_entries(2, false, ["c", "b", "a"].map(String::from));
        assert_eq!(h.to_vec(), vec!["c", "b"]);
    }
}
