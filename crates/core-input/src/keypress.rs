//! Character stream to key presses.
//!
//! Plain characters map one-to-one. Control bytes become Ctrl chords except
//! for the handful with conventional names (Tab, Return, Enter, Backspace,
//! Esc). An `ESC` starts a lookup in the supplied [`KeySequenceTable`]; when
//! the table has nothing, `ESC` + char is an Alt chord and an unlisted but
//! complete CSI sequence becomes `NamedKey::Unknown` instead of leaking its
//! bytes as text.
//!
//! A sequence still open at the end of a feed is held until more input
//! arrives or `escape_timeout` passes (`expire`), at which point it is
//! decoded with whatever is available (a lone `ESC` is the Esc key).

use std::time::{Duration, Instant};

use core_events::{KeyPress, KeyToken, ModMask, NamedKey};
use core_keymap::{KeySequenceTable, Resolution};
use tracing::trace;

const ESC: char = '\u{1b}';

#[derive(Debug, Clone)]
pub struct KeypressDecoder {
    table: KeySequenceTable,
    escape_timeout: Duration,
    pending: Vec<char>,
    deadline: Option<Instant>,
}

/// Key token for a single character outside any escape sequence.
pub fn token_for_char(c: char) -> KeyToken {
    match c {
        '\r' => KeyToken::Named(NamedKey::Return),
        '\n' => KeyToken::Named(NamedKey::Enter),
        '\t' => KeyToken::Named(NamedKey::Tab),
        '\u{8}' | '\u{7f}' => KeyToken::Named(NamedKey::Backspace),
        ESC => KeyToken::Named(NamedKey::Esc),
        '\0' => KeyToken::ctrl(' '),
        '\u{1}'..='\u{1a}' => KeyToken::ctrl(char::from(b'a' + (c as u8 - 1))),
        '\u{1c}'..='\u{1f}' => KeyToken::ctrl(char::from(c as u8 + 0x40)),
        other => KeyToken::Char(other),
    }
}

enum Step {
    Emit { consumed: usize, token: KeyToken },
    Wait,
}

impl KeypressDecoder {
    pub fn new(table: KeySequenceTable, escape_timeout: Duration) -> Self {
        Self {
            table,
            escape_timeout,
            pending: Vec::new(),
            deadline: None,
        }
    }

    pub fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    pub fn feed(&mut self, chars: &[char], now: Instant) -> Vec<KeyPress> {
        let mut out = Vec::new();
        if self.deadline.is_some_and(|d| now > d) {
            self.drain(now, true, &mut out);
        }
        self.pending.extend_from_slice(chars);
        self.drain(now, false, &mut out);
        self.deadline = (!self.pending.is_empty()).then(|| now + self.escape_timeout);
        out
    }

    /// Flush a held sequence once the escape timeout has passed.
    pub fn expire(&mut self, now: Instant) -> Vec<KeyPress> {
        let mut out = Vec::new();
        if self.deadline.is_some_and(|d| now >= d) {
            trace!(target: "input.key", pending = self.pending.len(), "escape_timeout");
            self.drain(now, true, &mut out);
            self.deadline = None;
        }
        out
    }

    /// Input ended: decode whatever is held without waiting.
    pub fn flush(&mut self, now: Instant) -> Vec<KeyPress> {
        let mut out = Vec::new();
        self.drain(now, true, &mut out);
        self.deadline = None;
        out
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.deadline = None;
    }

    fn drain(&mut self, now: Instant, flush: bool, out: &mut Vec<KeyPress>) {
        while !self.pending.is_empty() {
            match self.step(flush) {
                Step::Emit { consumed, token } => {
                    let sequence: String = self.pending.drain(..consumed).collect();
                    trace!(
                        target: "input.key",
                        token_kind = token.kind_label(),
                        mods = ?token.mods(),
                        seq_len = consumed,
                        "keypress_decoded"
                    );
                    out.push(KeyPress::from_parts(token, sequence, now));
                }
                Step::Wait => break,
            }
        }
    }

    fn step(&self, flush: bool) -> Step {
        let buf = &self.pending;
        if buf[0] != ESC {
            return Step::Emit {
                consumed: 1,
                token: token_for_char(buf[0]),
            };
        }
        match self.table.resolve(buf) {
            Resolution::Matched {
                ambiguous: true, ..
            } if !flush => Step::Wait,
            Resolution::Matched {
                consumed, token, ..
            } => Step::Emit { consumed, token },
            Resolution::NeedMore if !flush => Step::Wait,
            Resolution::NeedMore | Resolution::NoMatch => self.unmapped_escape(flush),
        }
    }

    fn unmapped_escape(&self, flush: bool) -> Step {
        let buf = &self.pending;
        let Some(&second) = buf.get(1) else {
            return if flush {
                Step::Emit {
                    consumed: 1,
                    token: KeyToken::Named(NamedKey::Esc),
                }
            } else {
                Step::Wait
            };
        };

        match second {
            '[' => match csi_len(buf) {
                Some(len) => Step::Emit {
                    consumed: len,
                    token: KeyToken::Named(NamedKey::Unknown),
                },
                None if !flush => Step::Wait,
                None => alt_of(second),
            },
            // SS3 takes exactly one final byte; anything else is Alt-O.
            'O' if buf.get(2).is_some_and(|c| ('\u{40}'..='\u{7e}').contains(c)) => {
                Step::Emit {
                    consumed: 3,
                    token: KeyToken::Named(NamedKey::Unknown),
                }
            }
            ESC => match self.table.resolve(&buf[1..]) {
                Resolution::Matched {
                    consumed, token, ..
                } => Step::Emit {
                    consumed: consumed + 1,
                    token: KeyToken::chord(token, ModMask::ALT),
                },
                Resolution::NeedMore if !flush => Step::Wait,
                _ if buf.len() == 2 && !flush => Step::Wait,
                _ => Step::Emit {
                    consumed: 1,
                    token: KeyToken::Named(NamedKey::Esc),
                },
            },
            other => alt_of(other),
        }
    }
}

fn alt_of(c: char) -> Step {
    Step::Emit {
        consumed: 2,
        token: KeyToken::chord(token_for_char(c), ModMask::ALT),
    }
}

/// Length of a complete CSI sequence (`ESC [ params intermediates final`).
fn csi_len(buf: &[char]) -> Option<usize> {
    let mut i = 2;
    while let Some(&c) = buf.get(i) {
        match c {
            '\u{30}'..='\u{3f}' | '\u{20}'..='\u{2f}' => i += 1,
            '\u{40}'..='\u{7e}' => return Some(i + 1),
            // Malformed; end the sequence before the offending char.
            _ => return Some(i),
        }
    }
    None
}
