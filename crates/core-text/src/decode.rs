//! Incremental UTF-8 decoder for arbitrarily chunked terminal input.
//!
//! Contract:
//! - `feed` returns every scalar value that can be fully decoded from the
//!   pending tail plus the new bytes, in order.
//! - A trailing sequence that is incomplete but still a valid prefix is kept
//!   until a later `feed` completes it (at most 3 bytes).
//! - Malformed input never stalls decoding: each maximal invalid subpart
//!   becomes one `U+FFFD` and decoding resumes at the following byte.

use std::char::REPLACEMENT_CHARACTER;

use tracing::trace;

#[derive(Debug, Default, Clone)]
pub struct ChunkDecoder {
    pending: Vec<u8>,
    replacements: u64,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<char> {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut out = Vec::with_capacity(buf.len());
        let mut rest: &[u8] = &buf;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.extend(s.chars());
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(s) = std::str::from_utf8(valid) {
                        out.extend(s.chars());
                    }
                    match e.error_len() {
                        Some(bad) => {
                            out.push(REPLACEMENT_CHARACTER);
                            self.replacements += 1;
                            rest = &tail[bad..];
                        }
                        None => {
                            // Incomplete but well-formed so far; wait for more bytes.
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        trace!(
            target: "input.decode",
            bytes = bytes.len(),
            chars = out.len(),
            pending = self.pending.len(),
            "chunk_decoded"
        );
        out
    }

    /// Input ended: a dangling incomplete sequence can never complete, so it
    /// is surfaced as a single `U+FFFD`.
    pub fn flush(&mut self) -> Option<char> {
        if self.pending.is_empty() {
            return None;
        }
        trace!(target: "input.decode", pending = self.pending.len(), "flush_incomplete");
        self.pending.clear();
        self.replacements += 1;
        Some(REPLACEMENT_CHARACTER)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of replacement characters produced so far.
    pub fn replacements(&self) -> u64 {
        self.replacements
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
