use core_events::ObserverError;
use core_render::Refresh;
use core_state::CompletionError;
use thiserror::Error;

/// Notifications delivered to session listeners, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A committed line, without its terminator.
    Line(String),
    /// History after a line was recorded, most recent first.
    History(Vec<String>),
    /// The prompt and line need redrawing.
    Refresh(Refresh),
    /// Candidates to display after a second consecutive Tab.
    Completions(Vec<String>),
    /// Ctrl-C while an interrupt handler is registered. The line is kept.
    Interrupt,
    /// Ctrl-Z while a suspend handler is registered.
    Suspend,
    /// Input is being held until `resume`.
    Pause,
    Resume,
    /// Emitted once, when the session closes.
    Close,
}

impl SessionEvent {
    pub fn kind_label(&self) -> &'static str {
        match self {
            SessionEvent::Line(_) => "line",
            SessionEvent::History(_) => "history",
            SessionEvent::Refresh(_) => "refresh",
            SessionEvent::Completions(_) => "completions",
            SessionEvent::Interrupt => "interrupt",
            SessionEvent::Suspend => "suspend",
            SessionEvent::Pause => "pause",
            SessionEvent::Resume => "resume",
            SessionEvent::Close => "close",
        }
    }
}

/// Failure surfaced from a session call. Input after the failure in the
/// same call was still processed.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Observer(#[from] ObserverError),
    #[error("question callback failed: {0}")]
    Question(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("session is closed")]
    Closed,
}
