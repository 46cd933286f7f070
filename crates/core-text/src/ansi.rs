//! Terminal control-sequence stripping.
//!
//! The pattern matches CSI sequences (`ESC [` / `0x9B`), OSC sequences
//! terminated by BEL, `ESC \` or ST, and short ESC sequences. It is the
//! widely used `ansi-regex` expression, so measurement agrees with what
//! most colour libraries emit.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

const ANSI_PATTERN: &str = concat!(
    r"[\x1B\x{9B}][\[\]()#;?]*",
    r"(?:(?:(?:(?:;[-a-zA-Z0-9/#&.:=?%@~_]+)*",
    r"|[a-zA-Z0-9]+(?:;[-a-zA-Z0-9/#&.:=?%@~_]*)*)?",
    r"(?:\x07|\x1B\x5C|\x{9C}))",
    r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?",
    r"[0-9A-PR-TZcf-nq-uy=><~]))",
);

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANSI_PATTERN).expect("control sequence pattern is valid"));

/// Remove recognized control sequences, leaving visible text untouched.
///
/// Borrows when nothing matched.
pub fn strip_control_sequences(text: &str) -> Cow<'_, str> {
    if !text.contains(['\u{1b}', '\u{9b}']) {
        return Cow::Borrowed(text);
    }
    ANSI.replace_all(text, "")
}
