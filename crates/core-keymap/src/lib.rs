//! core-keymap: escape-sequence lookup table for the keypress decoder.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the pending characters.
//! - Sequences are compiled into a trie so a partial escape sequence can be
//!   recognized as a strict prefix (`NeedMore`) without scanning every entry.
//! - No side effects: logging only at TRACE for traversal steps.
//!
//! The table is a supplied collaborator. `KeySequenceTable::xterm()` ships the
//! common xterm / VT220 / rxvt sequences; hosts can build their own with
//! [`KeySequenceTable::build`] or extend the default one.

use core_events::{KeyToken, ModMask, NamedKey};
use smallvec::SmallVec;
use tracing::trace;

const ESC: char = '\u{1b}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSpec {
    pub sequence: String,
    pub token: KeyToken,
}

impl SequenceSpec {
    pub fn new(sequence: impl Into<String>, token: KeyToken) -> Self {
        Self {
            sequence: sequence.into(),
            token,
        }
    }
}

#[derive(Debug, Clone)]
struct Edge {
    ch: char,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node {
    terminal: Option<usize>, // index into specs
    edges: SmallVec<[Edge; 4]>,
}

impl Node {
    fn new() -> Self {
        Self {
            terminal: None,
            edges: SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeySequenceTable {
    nodes: Vec<Node>,
    specs: Vec<SequenceSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `consumed` leading chars form a known sequence. `ambiguous` is set when
    /// the input ran out while a longer sequence was still possible.
    Matched {
        consumed: usize,
        token: KeyToken,
        ambiguous: bool,
    },
    /// The input is a strict prefix of at least one sequence.
    NeedMore,
    NoMatch,
}

impl Default for KeySequenceTable {
    fn default() -> Self {
        Self::xterm()
    }
}

impl KeySequenceTable {
    pub fn build(specs: Vec<SequenceSpec>) -> Self {
        let mut table = KeySequenceTable {
            nodes: vec![Node::new()],
            specs: Vec::new(),
        };
        for spec in specs {
            table.insert(spec);
        }
        table
    }

    /// Add one sequence; a later entry for the same sequence overrides the
    /// earlier one. Empty sequences are ignored.
    pub fn insert(&mut self, spec: SequenceSpec) {
        if spec.sequence.is_empty() {
            return;
        }
        let idx = self.specs.len();
        let mut cur = 0usize;
        for ch in spec.sequence.chars() {
            cur = match self.nodes[cur].edges.iter().find(|e| e.ch == ch) {
                Some(e) => e.next,
                None => {
                    let new_idx = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[cur].edges.push(Edge { ch, next: new_idx });
                    new_idx
                }
            };
        }
        if self.nodes[cur].terminal.is_some() {
            trace!(
                target: "input.key",
                spec_index = idx,
                node = cur,
                "terminal_override"
            );
        }
        self.nodes[cur].terminal = Some(idx);
        self.specs.push(spec);
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.terminal.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest known sequence at the start of `buffer`.
    pub fn resolve(&self, buffer: &[char]) -> Resolution {
        let mut node_idx = 0usize;
        let mut last_terminal: Option<(usize, usize)> = None; // (consumed, spec index)
        let mut exhausted = true;
        for (i, ch) in buffer.iter().enumerate() {
            match self.nodes[node_idx].edges.iter().find(|e| e.ch == *ch) {
                Some(edge) => {
                    node_idx = edge.next;
                    trace!(target: "input.key", step = i, node = node_idx, "advance");
                    if let Some(si) = self.nodes[node_idx].terminal {
                        last_terminal = Some((i + 1, si));
                    }
                }
                None => {
                    exhausted = false;
                    break;
                }
            }
        }
        // Input ran out inside the trie: a longer sequence may still arrive,
        // however far back the last terminal was.
        let open = exhausted && node_idx != 0 && !self.nodes[node_idx].edges.is_empty();
        match last_terminal {
            Some((consumed, si)) => Resolution::Matched {
                consumed,
                token: self.specs[si].token.clone(),
                ambiguous: open,
            },
            None if open => Resolution::NeedMore,
            None => Resolution::NoMatch,
        }
    }

    /// Default table: xterm normal and application cursor modes, VT220
    /// editing keys, function keys, xterm modifier parameters and the rxvt
    /// shifted / ctrl arrow variants.
    pub fn xterm() -> Self {
        Self::build(xterm_specs())
    }
}

fn named(key: NamedKey) -> KeyToken {
    KeyToken::Named(key)
}

/// xterm modifier parameter (`1 + bits`) to mask.
fn modifier_param(param: u8) -> ModMask {
    let bits = param.saturating_sub(1);
    let mut mods = ModMask::empty();
    if bits & 1 != 0 {
        mods |= ModMask::SHIFT;
    }
    if bits & 2 != 0 {
        mods |= ModMask::ALT;
    }
    if bits & 4 != 0 {
        mods |= ModMask::CTRL;
    }
    mods
}

pub fn xterm_specs() -> Vec<SequenceSpec> {
    let mut v = Vec::new();
    let mut add = |seq: String, token: KeyToken| v.push(SequenceSpec::new(seq, token));

    let letter_keys = [
        ('A', NamedKey::Up),
        ('B', NamedKey::Down),
        ('C', NamedKey::Right),
        ('D', NamedKey::Left),
        ('E', NamedKey::Clear),
        ('F', NamedKey::End),
        ('H', NamedKey::Home),
    ];
    for (final_ch, key) in letter_keys {
        add(format!("{ESC}[{final_ch}"), named(key));
        add(format!("{ESC}O{final_ch}"), named(key));
        for param in 2..=8u8 {
            add(
                format!("{ESC}[1;{param}{final_ch}"),
                KeyToken::chord(named(key), modifier_param(param)),
            );
        }
    }

    let tilde_keys = [
        (1, NamedKey::Home),
        (2, NamedKey::Insert),
        (3, NamedKey::Delete),
        (4, NamedKey::End),
        (5, NamedKey::PageUp),
        (6, NamedKey::PageDown),
        (7, NamedKey::Home),
        (8, NamedKey::End),
    ];
    for (code, key) in tilde_keys {
        add(format!("{ESC}[{code}~"), named(key));
        for param in 2..=8u8 {
            add(
                format!("{ESC}[{code};{param}~"),
                KeyToken::chord(named(key), modifier_param(param)),
            );
        }
    }

    for (n, final_ch) in ['P', 'Q', 'R', 'S'].into_iter().enumerate() {
        let f = NamedKey::F(n as u8 + 1);
        add(format!("{ESC}O{final_ch}"), named(f));
        add(format!("{ESC}[1{final_ch}"), named(f));
    }
    let function_codes = [11, 12, 13, 14, 15, 17, 18, 19, 20, 21, 23, 24];
    for (n, code) in function_codes.into_iter().enumerate() {
        add(format!("{ESC}[{code}~"), named(NamedKey::F(n as u8 + 1)));
    }
    // Linux console F1-F5.
    for (n, final_ch) in ['A', 'B', 'C', 'D', 'E'].into_iter().enumerate() {
        add(format!("{ESC}[[{final_ch}"), named(NamedKey::F(n as u8 + 1)));
    }

    add(
        format!("{ESC}[Z"),
        KeyToken::chord(named(NamedKey::Tab), ModMask::SHIFT),
    );

    // rxvt: lowercase finals carry shift (CSI) or ctrl (SS3).
    for (final_ch, key) in [
        ('a', NamedKey::Up),
        ('b', NamedKey::Down),
        ('c', NamedKey::Right),
        ('d', NamedKey::Left),
    ] {
        add(
            format!("{ESC}[{final_ch}"),
            KeyToken::chord(named(key), ModMask::SHIFT),
        );
        add(
            format!("{ESC}O{final_ch}"),
            KeyToken::chord(named(key), ModMask::CTRL),
        );
    }
    for (code, key) in [
        (2, NamedKey::Insert),
        (3, NamedKey::Delete),
        (5, NamedKey::PageUp),
        (6, NamedKey::PageDown),
        (7, NamedKey::Home),
        (8, NamedKey::End),
    ] {
        add(
            format!("{ESC}[{code}$"),
            KeyToken::chord(named(key), ModMask::SHIFT),
        );
        add(
            format!("{ESC}[{code}^"),
            KeyToken::chord(named(key), ModMask::CTRL),
        );
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn arrow_keys_resolve_in_both_cursor_modes() {
        let table = KeySequenceTable::xterm();
        for seq in ["\x1b[A", "\x1bOA"] {
            assert_eq!(
                table.resolve(&chars(seq)),
                Resolution::Matched {
                    consumed: 3,
                    token: KeyToken::Named(NamedKey::Up),
                    ambiguous: false,
                }
            );
        }
    }

    #[test]
    fn strict_prefix_needs_more() {
        let table = KeySequenceTable::xterm();
        assert_eq!(table.resolve(&chars("\x1b")), Resolution::NeedMore);
        assert_eq!(table.resolve(&chars("\x1b[")), Resolution::NeedMore);
        assert_eq!(table.resolve(&chars("\x1b[1;5")), Resolution::NeedMore);
    }

    #[test]
    fn trailing_input_is_not_consumed() {
        let table = KeySequenceTable::xterm();
        assert_eq!(
            table.resolve(&chars("\x1b[3~abc")),
            Resolution::Matched {
                consumed: 4,
                token: KeyToken::Named(NamedKey::Delete),
                ambiguous: false,
            }
        );
    }

    #[test]
    fn modifier_parameters_build_chords() {
        let table = KeySequenceTable::xterm();
        assert_eq!(
            table.resolve(&chars("\x1b[1;5C")),
            Resolution::Matched {
                consumed: 6,
                token: KeyToken::chord(KeyToken::Named(NamedKey::Right), ModMask::CTRL),
                ambiguous: false,
            }
        );
        assert_eq!(
            table.resolve(&chars("\x1b[3;3~")),
            Resolution::Matched {
                consumed: 6,
                token: KeyToken::chord(KeyToken::Named(NamedKey::Delete), ModMask::ALT),
                ambiguous: false,
            }
        );
    }

    #[test]
    fn function_keys() {
        let table = KeySequenceTable::xterm();
        assert_eq!(
            table.resolve(&chars("\x1bOP")),
            Resolution::Matched {
                consumed: 3,
                token: KeyToken::Named(NamedKey::F(1)),
                ambiguous: false,
            }
        );
        assert_eq!(
            table.resolve(&chars("\x1b[24~")),
            Resolution::Matched {
                consumed: 5,
                token: KeyToken::Named(NamedKey::F(12)),
                ambiguous: false,
            }
        );
    }

    #[test]
    fn unknown_sequence_and_plain_char_do_not_match() {
        let table = KeySequenceTable::xterm();
        assert_eq!(table.resolve(&chars("\x1bb")), Resolution::NoMatch);
        assert_eq!(table.resolve(&chars("x")), Resolution::NoMatch);
        assert_eq!(table.resolve(&[]), Resolution::NoMatch);
    }

    #[test]
    fn terminal_that_is_also_prefix_reports_ambiguity() {
        let table = KeySequenceTable::build(vec![
            SequenceSpec::new("\x1bx", KeyToken::Named(NamedKey::F(1))),
            SequenceSpec::new("\x1bxy", KeyToken::Named(NamedKey::F(2))),
        ]);
        assert_eq!(
            table.resolve(&chars("\x1bx")),
            Resolution::Matched {
                consumed: 2,
                token: KeyToken::Named(NamedKey::F(1)),
                ambiguous: true,
            }
        );
        assert_eq!(
            table.resolve(&chars("\x1bxy")),
            Resolution::Matched {
                consumed: 3,
                token: KeyToken::Named(NamedKey::F(2)),
                ambiguous: false,
            }
        );
        assert_eq!(
            table.resolve(&chars("\x1bxz")),
            Resolution::Matched {
                consumed: 2,
                token: KeyToken::Named(NamedKey::F(1)),
                ambiguous: false,
            }
        );
    }

    #[test]
    fn input_ending_past_a_shorter_terminal_stays_ambiguous() {
        let table = KeySequenceTable::build(vec![
            SequenceSpec::new("\x1bx", KeyToken::Named(NamedKey::F(1))),
            SequenceSpec::new("\x1bxyz", KeyToken::Named(NamedKey::F(2))),
        ]);
        assert_eq!(
            table.resolve(&chars("\x1bxy")),
            Resolution::Matched {
                consumed: 2,
                token: KeyToken::Named(NamedKey::F(1)),
                ambiguous: true,
            }
        );
        assert_eq!(
            table.resolve(&chars("\x1bxyq")),
            Resolution::Matched {
                consumed: 2,
                token: KeyToken::Named(NamedKey::F(1)),
                ambiguous: false,
            }
        );
    }

    #[test]
    fn later_insert_overrides_earlier() {
        let mut table = KeySequenceTable::xterm();
        let before = table.len();
        table.insert(SequenceSpec::new("\x1b[A", KeyToken::Named(NamedKey::PageUp)));
        assert_eq!(table.len(), before);
        assert_eq!(
            table.resolve(&chars("\x1b[A")),
            Resolution::Matched {
                consumed: 3,
                token: KeyToken::Named(NamedKey::PageUp),
                ambiguous: false,
            }
        );
    }
}
