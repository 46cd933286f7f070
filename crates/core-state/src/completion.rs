//! Completer contract and completion splice rules.

use thiserror::Error;

/// Candidates for the text before the cursor. `matched` is the trailing part
/// of that text the candidates complete (for `"ls sr"` completing file names,
/// `matched` would be `"sr"`).
///
/// With `replace_prefix` set the single candidate replaces the whole text
/// before the cursor as-is, even when it is shorter or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub candidates: Vec<String>,
    pub matched: String,
    pub replace_prefix: bool,
}

impl Completion {
    pub fn new<I, S>(candidates: I, matched: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            matched: matched.into(),
            replace_prefix: false,
        }
    }

    /// Replace the whole prefix handed to the completer with `value`.
    pub fn replace(prefix: &str, value: impl Into<String>) -> Self {
        Self {
            candidates: vec![value.into()],
            matched: prefix.to_string(),
            replace_prefix: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Supplies completions for the text before the cursor.
pub trait Completer: Send {
    fn complete(&mut self, prefix: &str) -> anyhow::Result<Completion>;
}

impl<F> Completer for F
where
    F: FnMut(&str) -> anyhow::Result<Completion> + Send,
{
    fn complete(&mut self, prefix: &str) -> anyhow::Result<Completion> {
        self(prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The completer offered nothing.
    NoCandidates,
    /// The shared prefix extended the matched text in place.
    Extended,
    /// The matched text was replaced by the shared prefix.
    Replaced,
    /// Nothing left to splice and Tab was pressed twice: show these.
    Listing(Vec<String>),
    /// Nothing left to splice on a first Tab.
    Unchanged,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completer failed: {0}")]
    Completer(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<anyhow::Error> for CompletionError {
    fn from(err: anyhow::Error) -> Self {
        CompletionError::Completer(err.into())
    }
}

/// Longest prefix shared by every non-empty candidate, on char boundaries.
pub fn common_prefix<S: AsRef<str>>(candidates: &[S]) -> String {
    let mut iter = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !c.is_empty());
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut end = first.len();
    for other in iter {
        end = first[..end]
            .char_indices()
            .zip(other.chars())
            .find(|((_, a), b)| a != b)
            .map_or(end.min(other.len()), |((i, _), _)| i);
    }
    first[..end].to_string()
}
