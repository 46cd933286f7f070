//! Display width of scalar values and strings.
//!
//! Every scalar value falls in one of three classes:
//! - zero width: C0/C1 controls, combining marks, zero-width formatting
//!   characters and variation selectors;
//! - wide (2 cells): East Asian Wide/Fullwidth and emoji presentation
//!   characters, as reported by `unicode_width`;
//! - narrow (1 cell): everything else.
//!
//! String measurement strips control sequences and normalizes to NFC first so
//! decomposed and precomposed input measure the same.

use unicode_normalization::UnicodeNormalization;
use unicode_width::UnicodeWidthChar;

use crate::ansi::strip_control_sequences;

/// Whether `code` renders in two terminal columns. Non-scalar input
/// (surrogates, values above `U+10FFFF`) is never wide.
pub fn is_wide_code_point(code: u32) -> bool {
    char::from_u32(code).is_some_and(is_wide_char)
}

pub fn is_wide_char(c: char) -> bool {
    UnicodeWidthChar::width(c) == Some(2)
}

pub fn is_zero_width(c: char) -> bool {
    let code = u32::from(c);
    code <= 0x1F
        || (0x7F..=0x9F).contains(&code)
        || (0x300..=0x36F).contains(&code) // combining diacritical marks
        || (0x200B..=0x200F).contains(&code) // zero-width space / joiners / marks
        || (0x20D0..=0x20FF).contains(&code) // combining marks for symbols
        || (0xFE00..=0xFE0F).contains(&code) // variation selectors
        || (0xFE20..=0xFE2F).contains(&code) // combining half marks
        || (0xE0100..=0xE01EF).contains(&code) // variation selectors supplement
}

/// Cell width of a single scalar value: 0, 1 or 2.
#[inline]
pub fn char_width(c: char) -> usize {
    if is_zero_width(c) {
        0
    } else if is_wide_char(c) {
        2
    } else {
        1
    }
}

/// Column width of `text` once control sequences are removed.
pub fn display_width(text: &str) -> usize {
    let visible = strip_control_sequences(text);
    if visible.is_ascii() {
        return visible.bytes().filter(|b| *b >= 0x20 && *b != 0x7F).count();
    }
    visible.nfc().map(char_width).sum()
}
