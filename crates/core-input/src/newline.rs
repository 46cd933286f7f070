//! Line terminator disambiguation.
//!
//! `\n`, `\r\n` and bare `\r` all end a line. A `\r` that ends a feed cannot be
//! classified yet: the matching `\n` may still be in flight. The disambiguator
//! then holds a single deadline (`now + crlf_delay`); a `\n` arriving by that
//! deadline collapses into the same boundary, anything else (expiry, a later
//! feed, another character) resolves the `\r` as bare.
//!
//! Terminator characters are always forwarded as `NewlineItem::Char` so key
//! observers still see them; the `Boundary` follows once resolved.

use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineItem {
    Char(char),
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingNewline {
    #[default]
    Idle,
    AwaitingLf {
        deadline: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct NewlineDisambiguator {
    crlf_delay: Duration,
    state: PendingNewline,
}

impl NewlineDisambiguator {
    pub fn new(crlf_delay: Duration) -> Self {
        Self {
            crlf_delay,
            state: PendingNewline::Idle,
        }
    }

    pub fn crlf_delay(&self) -> Duration {
        self.crlf_delay
    }

    pub fn state(&self) -> PendingNewline {
        self.state
    }

    pub fn feed(&mut self, chars: &[char], now: Instant) -> Vec<NewlineItem> {
        let mut out = Vec::with_capacity(chars.len() + 1);
        let mut rest = chars;

        if let PendingNewline::AwaitingLf { deadline } = self.state {
            if now > deadline {
                trace!(target: "input.newline", "bare_cr_late_feed");
                self.state = PendingNewline::Idle;
                out.push(NewlineItem::Boundary);
            } else if let Some((&first, tail)) = rest.split_first() {
                self.state = PendingNewline::Idle;
                if first == '\n' {
                    trace!(target: "input.newline", "crlf_collapsed");
                    out.push(NewlineItem::Char('\n'));
                    rest = tail;
                } else {
                    trace!(target: "input.newline", "bare_cr");
                }
                out.push(NewlineItem::Boundary);
            }
        }

        let mut i = 0;
        while i < rest.len() {
            let ch = rest[i];
            match ch {
                '\n' => {
                    out.push(NewlineItem::Char('\n'));
                    out.push(NewlineItem::Boundary);
                }
                '\r' => {
                    out.push(NewlineItem::Char('\r'));
                    match rest.get(i + 1) {
                        Some('\n') => {
                            out.push(NewlineItem::Char('\n'));
                            out.push(NewlineItem::Boundary);
                            i += 1;
                        }
                        Some(_) => out.push(NewlineItem::Boundary),
                        None => {
                            let deadline = now + self.crlf_delay;
                            trace!(
                                target: "input.newline",
                                delay_ms = self.crlf_delay.as_millis() as u64,
                                "awaiting_lf"
                            );
                            self.state = PendingNewline::AwaitingLf { deadline };
                        }
                    }
                }
                other => out.push(NewlineItem::Char(other)),
            }
            i += 1;
        }
        out
    }

    /// Resolve a pending `\r` as bare once its deadline has passed. Returns
    /// whether a boundary fired.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            PendingNewline::AwaitingLf { deadline } if now >= deadline => {
                trace!(target: "input.newline", "crlf_timer_expired");
                self.state = PendingNewline::Idle;
                true
            }
            _ => false,
        }
    }

    /// Input ended: a pending `\r` can only be bare.
    pub fn flush(&mut self) -> bool {
        let was_pending = self.is_awaiting();
        self.state = PendingNewline::Idle;
        was_pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            PendingNewline::AwaitingLf { deadline } => Some(deadline),
            PendingNewline::Idle => None,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, PendingNewline::AwaitingLf { .. })
    }

    /// Drop any pending `\r` without emitting a boundary.
    pub fn cancel(&mut self) {
        self.state = PendingNewline::Idle;
    }
}
