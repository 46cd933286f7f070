//! Kill ring: text removed by line kills, newest first, recallable with
//! yank and cycled with yank-pop.

use std::collections::VecDeque;

use tracing::trace;

pub const KILL_RING_MAX: usize = 32;

#[derive(Debug, Default, Clone)]
pub struct KillRing {
    entries: VecDeque<String>, // newest at index 0
    cursor: usize,
}

impl KillRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store killed text. Empty text and a repeat of the newest entry are
    /// ignored. Returns whether the oldest entry was rotated out.
    pub fn push(&mut self, killed: String) -> bool {
        if killed.is_empty() || self.entries.front() == Some(&killed) {
            return false;
        }
        self.entries.push_front(killed);
        self.cursor = 0;
        let rotated = self.entries.len() > KILL_RING_MAX;
        if rotated {
            self.entries.pop_back();
        }
        trace!(target: "state.edit", ring_len = self.entries.len(), rotated, "kill_ring_push");
        rotated
    }

    /// Entry a yank would insert.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Advance to the next older entry (wrapping) and return it.
    pub fn rotate(&mut self) -> Option<&str> {
        if self.entries.len() < 2 {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_repeat_suppressed() {
        let mut ring = KillRing::new();
        ring.push("one".into());
        ring.push("two".into());
        ring.push("two".into());
        ring.push(String::new());
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["two", "one"]);
        assert_eq!(ring.current(), Some("two"));
    }

    #[test]
    fn rotate_wraps_around() {
        let mut ring = KillRing::new();
        ring.push("a".into());
        ring.push("b".into());
        assert_eq!(ring.rotate(), Some("a"));
        assert_eq!(ring.rotate(), Some("b"));
    }

    #[test]
    fn single_entry_does_not_rotate() {
        let mut ring = KillRing::new();
        ring.push("only".into());
        assert_eq!(ring.rotate(), None);
        assert_eq!(ring.current(), Some("only"));
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut ring = KillRing::new();
        for i in 0..=KILL_RING_MAX {
            ring.push(format!("k{i}"));
        }
        assert_eq!(ring.len(), KILL_RING_MAX);
        assert_eq!(ring.entries().last(), Some("k1"));
    }
}
