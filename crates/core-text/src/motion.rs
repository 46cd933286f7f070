//! Word-boundary motions over a scalar-value buffer.
//!
//! A word character is alphanumeric or `_`; whitespace is Unicode whitespace;
//! everything else is punctuation. Each function returns how many scalar
//! values the motion spans from the cursor, never more than the slice length.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Punct,
    Word,
}

fn class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if is_word(c) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

pub fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn run_len<'a>(chars: impl Iterator<Item = &'a char>, pred: impl Fn(char) -> bool) -> usize {
    chars.take_while(|c| pred(**c)).count()
}

/// Distance to the start of the previous word: skip whitespace leftwards,
/// then one run of word characters or of punctuation.
pub fn word_left_len(before: &[char]) -> usize {
    let spaces = run_len(before.iter().rev(), char::is_whitespace);
    let rest = &before[..before.len() - spaces];
    let run = match rest.last().map(|c| class(*c)) {
        Some(CharClass::Word) => run_len(rest.iter().rev(), is_word),
        Some(CharClass::Punct) => run_len(rest.iter().rev(), |c| class(c) == CharClass::Punct),
        _ => 0,
    };
    spaces + run
}

/// Distance past the next word: one run of a single class, then any
/// whitespace that follows it.
pub fn word_right_len(after: &[char]) -> usize {
    let Some(first) = after.first() else {
        return 0;
    };
    let kind = class(*first);
    let run = run_len(after.iter(), |c| class(c) == kind);
    if kind == CharClass::Space {
        return run;
    }
    run + run_len(after[run..].iter(), char::is_whitespace)
}

/// Like [`word_right_len`], but a leading non-word run swallows punctuation
/// and whitespace together up to the next word character.
pub fn delete_word_right_len(after: &[char]) -> usize {
    let Some(first) = after.first() else {
        return 0;
    };
    match class(*first) {
        CharClass::Space => run_len(after.iter(), char::is_whitespace),
        CharClass::Word => {
            let run = run_len(after.iter(), is_word);
            run + run_len(after[run..].iter(), char::is_whitespace)
        }
        CharClass::Punct => run_len(after.iter(), |c| !is_word(c)),
    }
}
