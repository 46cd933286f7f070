//! The line-editing session.
//!
//! A `Session` owns the whole pipeline for one terminal: bytes are decoded to
//! chars, line terminators are resolved into boundaries, the remaining chars
//! become key presses, and key presses edit the buffer. Everything runs
//! synchronously inside `feed_at` / `expire` / `end`; timers are deadlines the
//! caller polls through `next_deadline`.
//!
//! Observers (key observers and event listeners) are isolated: a failure is
//! logged, the rest of the input in the same call is still processed, and the
//! first failure is returned from the call. A completer failure wins over an
//! observer failure, which wins over a failed question callback.
//!
//! A paused session holds incoming bytes and processes them on `resume`.
//! Timers armed before the pause still fire through `expire`.

use std::fmt;
use std::mem;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use core_config::{ConfigError, SessionConfig};
use core_events::{KeyPress, KeyToken, NamedKey, ObserverError, ObserverId, ObserverList};
use core_input::{KeypressDecoder, NewlineDisambiguator, NewlineItem};
use core_keymap::KeySequenceTable;
use core_render::Refresh;
use core_state::{
    Completer, CompletionError, CompletionOutcome, EditBuffer, HistoryStore, NavDirection,
};
use core_text::{ChunkDecoder, DisplayPos, Layout, cursor_position_with, display_pos};
use tracing::{debug, info, trace, warn};

use crate::dispatch::{Action, translate};
use crate::event::{SessionError, SessionEvent};

type QuestionError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Default)]
struct PendingErrors {
    completion: Option<CompletionError>,
    observer: Option<ObserverError>,
    question: Option<QuestionError>,
}

impl PendingErrors {
    fn observer(&mut self, err: Option<ObserverError>) {
        if self.observer.is_none() {
            self.observer = err;
        }
    }

    fn completion(&mut self, err: CompletionError) {
        if self.completion.is_none() {
            self.completion = Some(err);
        }
    }

    fn question(&mut self, err: QuestionError) {
        if self.question.is_none() {
            self.question = Some(err);
        }
    }

    fn take(&mut self) -> Result<(), SessionError> {
        let completion = self.completion.take();
        let observer = self.observer.take();
        let question = self.question.take();
        match (completion, observer, question) {
            (Some(err), _, _) => Err(err.into()),
            (None, Some(err), _) => Err(err.into()),
            (None, None, Some(err)) => Err(SessionError::Question(err)),
            (None, None, None) => Ok(()),
        }
    }
}

type Answer = Box<dyn FnOnce(String) -> anyhow::Result<()> + Send>;

/// A `question` waiting for its line.
struct PendingQuestion {
    answer: Answer,
    saved_prompt: String,
}

/// Listener ids registered through `on_interrupt` / `on_suspend`.
#[derive(Default)]
struct SignalHandlers {
    interrupt: Vec<ObserverId>,
    suspend: Vec<ObserverId>,
}

impl SignalHandlers {
    fn forget(&mut self, id: ObserverId) {
        self.interrupt.retain(|h| *h != id);
        self.suspend.retain(|h| *h != id);
    }
}

#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    completer: Option<Box<dyn Completer>>,
    table: Option<KeySequenceTable>,
}

impl SessionBuilder {
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn completer<C: Completer + 'static>(mut self, completer: C) -> Self {
        self.completer = Some(Box::new(completer));
        self
    }

    /// Escape-sequence table; defaults to [`KeySequenceTable::xterm`].
    pub fn key_table(mut self, table: KeySequenceTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn build(self) -> Result<Session, ConfigError> {
        Session::from_parts(
            self.config,
            self.completer,
            self.table.unwrap_or_default(),
        )
    }
}

pub struct Session {
    config: SessionConfig,
    prompt: String,
    layout: Layout,
    decoder: ChunkDecoder,
    newline: NewlineDisambiguator,
    keys: KeypressDecoder,
    buffer: EditBuffer,
    history: HistoryStore,
    completer: Option<Box<dyn Completer>>,
    key_observers: ObserverList<KeyPress>,
    listeners: ObserverList<SessionEvent>,
    signals: SignalHandlers,
    question: Option<PendingQuestion>,
    paused: bool,
    held: Vec<u8>,
    /// Text before the cursor when Up/Down navigation started.
    search: Option<String>,
    prev_key: Option<KeyToken>,
    prev_rows: usize,
    closed: bool,
    errors: PendingErrors,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cursor", &self.buffer.cursor())
            .field("len", &self.buffer.len())
            .field("history_len", &self.history.len())
            .field("completer", &self.completer.is_some())
            .field("question", &self.question.is_some())
            .field("paused", &self.paused)
            .field("held", &self.held.len())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    fn from_parts(
        config: SessionConfig,
        completer: Option<Box<dyn Completer>>,
        table: KeySequenceTable,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = Layout {
            tab_size: config.tab_size(),
            columns: config.columns(),
        };
        let history = HistoryStore::with_entries(
            config.history_size(),
            config.remove_history_duplicates(),
            config.history().iter().cloned(),
        );
        info!(
            target: "session",
            crlf_delay_ms = config.crlf_delay().as_millis() as u64,
            escape_timeout_ms = config.escape_code_timeout().as_millis() as u64,
            history_size = config.history_size(),
            seeded_history = history.len(),
            completer = completer.is_some(),
            "session_created"
        );
        Ok(Self {
            prompt: config.prompt().to_string(),
            layout,
            decoder: ChunkDecoder::new(),
            newline: NewlineDisambiguator::new(config.crlf_delay()),
            keys: KeypressDecoder::new(table, config.escape_code_timeout()),
            buffer: EditBuffer::new(),
            history,
            completer,
            key_observers: ObserverList::new("keypress"),
            listeners: ObserverList::new("session"),
            signals: SignalHandlers::default(),
            question: None,
            paused: false,
            held: Vec::new(),
            search: None,
            prev_key: None,
            prev_rows: 0,
            closed: false,
            errors: PendingErrors::default(),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn on_event<F>(&mut self, listener: F) -> ObserverId
    where
        F: FnMut(&SessionEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener registered with `on_event`, `on_interrupt` or
    /// `on_suspend`.
    pub fn off_event(&mut self, id: ObserverId) -> bool {
        self.signals.forget(id);
        self.listeners.unsubscribe(id)
    }

    /// Handle Ctrl-C. While at least one interrupt handler is registered,
    /// Ctrl-C emits `SessionEvent::Interrupt` and leaves the line alone;
    /// without one it closes the session.
    pub fn on_interrupt<F>(&mut self, mut handler: F) -> ObserverId
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        let id = self.listeners.subscribe(move |event| match event {
            SessionEvent::Interrupt => handler(),
            _ => Ok(()),
        });
        self.signals.interrupt.push(id);
        id
    }

    /// Handle Ctrl-Z. Without a suspend handler Ctrl-Z does nothing; job
    /// control belongs to the host.
    pub fn on_suspend<F>(&mut self, mut handler: F) -> ObserverId
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        let id = self.listeners.subscribe(move |event| match event {
            SessionEvent::Suspend => handler(),
            _ => Ok(()),
        });
        self.signals.suspend.push(id);
        id
    }

    pub fn on_keypress<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&KeyPress) -> anyhow::Result<()> + Send + 'static,
    {
        self.key_observers.subscribe(observer)
    }

    pub fn off_keypress(&mut self, id: ObserverId) -> bool {
        self.key_observers.unsubscribe(id)
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.feed_at(bytes, Instant::now())
    }

    /// Process one chunk of terminal input received at `now`.
    pub fn feed_at(&mut self, bytes: &[u8], now: Instant) -> Result<(), SessionError> {
        if self.closed {
            trace!(target: "session", bytes = bytes.len(), "feed_after_close_ignored");
            return Ok(());
        }
        if self.paused {
            self.held.extend_from_slice(bytes);
            trace!(target: "session", bytes = bytes.len(), held = self.held.len(), "feed_held");
            return Ok(());
        }
        self.ingest(bytes, now);
        self.errors.take()
    }

    fn ingest(&mut self, bytes: &[u8], now: Instant) {
        trace!(target: "input.decode", bytes = bytes.len(), "chunk_received");
        let stale = self.keys.expire(now);
        self.handle_keys(stale);
        let chars = self.decoder.feed(bytes);
        let items = self.newline.feed(&chars, now);
        self.process(items, now);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop processing input; later chunks are held until `resume`.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if !self.closed {
            self.pause_inner();
        }
        self.errors.take()
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.resume_at(Instant::now())
    }

    /// Resume a paused session and process everything held since the pause.
    pub fn resume_at(&mut self, now: Instant) -> Result<(), SessionError> {
        if !self.closed {
            self.resume_inner(now);
        }
        self.errors.take()
    }

    fn pause_inner(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        debug!(target: "session", "paused");
        self.emit(SessionEvent::Pause);
    }

    fn resume_inner(&mut self, now: Instant) {
        if !self.paused {
            return;
        }
        self.paused = false;
        let held = mem::take(&mut self.held);
        debug!(target: "session", held = held.len(), "resumed");
        self.emit(SessionEvent::Resume);
        if !held.is_empty() && !self.closed {
            self.ingest(&held, now);
        }
    }

    /// Draw the prompt, resuming a paused session first. Unless
    /// `preserve_cursor` is set the cursor moves to the start of the line.
    pub fn show_prompt(&mut self, preserve_cursor: bool) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        self.show_prompt_inner(preserve_cursor, Instant::now());
        self.errors.take()
    }

    fn show_prompt_inner(&mut self, preserve_cursor: bool, now: Instant) {
        self.resume_inner(now);
        if self.closed {
            return;
        }
        if !preserve_cursor {
            self.buffer.move_home();
        }
        self.emit_refresh(false);
    }

    /// Ask `query` and hand the next committed line to `answer` instead of
    /// emitting it as `SessionEvent::Line`. The prompt is swapped for `query`
    /// until then. While a question is already pending the prompt is only
    /// redrawn and `answer` is dropped.
    pub fn question<F>(&mut self, query: impl Into<String>, answer: F) -> Result<(), SessionError>
    where
        F: FnOnce(String) -> anyhow::Result<()> + Send + 'static,
    {
        if self.closed {
            return Err(SessionError::Closed);
        }
        if self.question.is_some() {
            debug!(target: "session", "question_already_pending");
        } else {
            let saved_prompt = mem::replace(&mut self.prompt, query.into());
            self.question = Some(PendingQuestion {
                answer: Box::new(answer),
                saved_prompt,
            });
            debug!(target: "session", "question_asked");
        }
        self.show_prompt_inner(false, Instant::now());
        self.errors.take()
    }

    pub fn has_question(&self) -> bool {
        self.question.is_some()
    }

    /// Drop a pending question: its callback never runs, the previous prompt
    /// returns and the partial answer is discarded. Returns whether a question
    /// was pending.
    pub fn cancel_question(&mut self) -> bool {
        let Some(pending) = self.question.take() else {
            return false;
        };
        self.prompt = pending.saved_prompt;
        self.clear_line();
        debug!(target: "session", "question_cancelled");
        true
    }

    /// Discard the current line. The host is expected to move to a fresh
    /// terminal line; the next refresh draws from there.
    pub fn clear_line(&mut self) {
        self.buffer.clear();
        self.search = None;
        self.prev_key = None;
        self.prev_rows = 0;
        self.history.reset_navigation();
    }

    /// Fire every timer whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        let held = self.keys.expire(now);
        self.handle_keys(held);
        if !self.closed && self.newline.expire(now) {
            self.commit_line();
        }
        self.errors.take()
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.closed {
            return None;
        }
        match (self.newline.next_deadline(), self.keys.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn end(&mut self) -> Result<(), SessionError> {
        self.end_at(Instant::now())
    }

    /// Input ended: resolve everything still pending, emit the unterminated
    /// remainder as a final line, then close.
    pub fn end_at(&mut self, now: Instant) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        let held = mem::take(&mut self.held);
        if !held.is_empty() {
            self.ingest(&held, now);
        }
        if !self.closed && let Some(replacement) = self.decoder.flush() {
            let items = self.newline.feed(&[replacement], now);
            self.process(items, now);
        }
        let held = self.keys.flush(now);
        self.handle_keys(held);
        if !self.closed && self.newline.flush() {
            self.commit_line();
        }
        if !self.closed && !self.buffer.is_empty() {
            self.commit_line();
        }
        debug!(target: "session", "input_ended");
        self.close_inner();
        self.errors.take()
    }

    /// Close the session. Only the first call has any effect.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.close_inner();
        self.errors.take()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn line(&self) -> String {
        self.buffer.line()
    }

    /// Cursor index in chars.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Display position of the cursor, prompt included.
    pub fn cursor_position(&self) -> DisplayPos {
        cursor_position_with(&self.prompt, &self.buffer.before_cursor(), &self.layout)
    }

    /// Most recent first.
    pub fn history(&self) -> Vec<String> {
        self.history.to_vec()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Terminal width changed; redraw with the new wrap width.
    pub fn set_columns(&mut self, columns: Option<usize>) -> Result<(), SessionError> {
        self.layout.columns = columns.filter(|c| *c > 0);
        if !self.closed {
            self.emit_refresh(false);
        }
        self.errors.take()
    }

    /// Refresh for drawing the prompt and line right now. Later `Refresh`
    /// events assume this draw happened.
    pub fn redraw(&mut self) -> Refresh {
        let refresh = self.snapshot(false);
        self.prev_rows = refresh.cursor.row;
        refresh
    }

    fn snapshot(&self, clear_screen: bool) -> Refresh {
        let line = self.buffer.line();
        let cursor = self.cursor_position();
        let end = display_pos(&format!("{}{}", self.prompt, line), &self.layout);
        Refresh {
            prompt: self.prompt.clone(),
            line,
            cursor,
            end,
            prev_rows: self.prev_rows,
            clear_screen,
        }
    }

    fn process(&mut self, items: Vec<NewlineItem>, now: Instant) {
        let mut run = Vec::new();
        for item in items {
            if self.closed {
                return;
            }
            match item {
                NewlineItem::Char(c) => run.push(c),
                NewlineItem::Boundary => {
                    self.feed_keys(&run, now);
                    run.clear();
                    if !self.closed {
                        self.commit_line();
                    }
                }
            }
        }
        self.feed_keys(&run, now);
    }

    fn feed_keys(&mut self, run: &[char], now: Instant) {
        if run.is_empty() || self.closed {
            return;
        }
        let keys = self.keys.feed(run, now);
        self.handle_keys(keys);
    }

    fn handle_keys(&mut self, keys: Vec<KeyPress>) {
        for key in keys {
            if self.closed {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyPress) {
        let failure = self.key_observers.dispatch(&key);
        self.errors.observer(failure);

        let action = translate(&key.token, self.completer.is_some());
        if action != Some(Action::YankPop) {
            self.buffer.break_yank();
        }
        match action {
            Some(a) if a.is_history_search() => {}
            Some(a) if a.is_history() => self.search = None,
            _ => {
                self.search = None;
                self.history.reset_navigation();
            }
        }

        let last_was_tab = matches!(self.prev_key, Some(KeyToken::Named(NamedKey::Tab)));
        self.prev_key = Some(key.token);
        let Some(action) = action else {
            return;
        };
        trace!(target: "session", action = action.label(), "key_dispatched");
        self.apply(action, last_was_tab);
    }

    fn apply(&mut self, action: Action, last_was_tab: bool) {
        let changed = match action {
            Action::Insert(c) => {
                self.buffer.insert(c);
                true
            }
            Action::DeleteLeft => self.buffer.delete_before(),
            Action::DeleteRight => self.buffer.delete_after(),
            Action::DeleteRightOrEof => {
                if self.buffer.is_empty() {
                    self.close_inner();
                    return;
                }
                self.buffer.delete_after()
            }
            Action::MoveLeft => self.buffer.move_cursor(-1),
            Action::MoveRight => self.buffer.move_cursor(1),
            Action::LineStart => self.buffer.move_home(),
            Action::LineEnd => self.buffer.move_end(),
            Action::WordLeft => self.buffer.word_left(),
            Action::WordRight => self.buffer.word_right(),
            Action::DeleteWordLeft => self.buffer.delete_word_left(),
            Action::DeleteWordRight => self.buffer.delete_word_right(),
            Action::DeleteLineLeft => self.buffer.delete_line_left(),
            Action::DeleteLineRight => self.buffer.delete_line_right(),
            Action::Yank => self.buffer.yank(),
            Action::YankPop => self.buffer.yank_pop(),
            Action::Undo => self.buffer.undo(),
            Action::Redo => self.buffer.redo(),
            Action::HistoryPrev { substring } => {
                self.navigate_history(NavDirection::Older, substring)
            }
            Action::HistoryNext { substring } => {
                self.navigate_history(NavDirection::Newer, substring)
            }
            Action::Complete => self.complete(last_was_tab),
            Action::ClearScreen => {
                self.emit_refresh(true);
                return;
            }
            Action::Interrupt => {
                if self.signals.interrupt.is_empty() {
                    debug!(target: "session", "interrupt_closes");
                    self.close_inner();
                } else {
                    self.emit(SessionEvent::Interrupt);
                }
                return;
            }
            Action::Suspend => {
                if self.signals.suspend.is_empty() {
                    trace!(target: "session", "suspend_ignored");
                } else {
                    self.emit(SessionEvent::Suspend);
                }
                return;
            }
        };
        if changed {
            self.emit_refresh(false);
        }
    }

    fn navigate_history(&mut self, direction: NavDirection, substring: bool) -> bool {
        let search = if substring {
            self.search
                .get_or_insert_with(|| self.buffer.before_cursor())
                .clone()
        } else {
            String::new()
        };
        let current = self.buffer.line();
        match self.history.navigate(direction, &search, &current) {
            Some(recall) => {
                self.buffer.replace(recall.text());
                true
            }
            None => false,
        }
    }

    fn complete(&mut self, last_was_tab: bool) -> bool {
        let Some(completer) = self.completer.as_deref_mut() else {
            return false;
        };
        match self.buffer.request_completion(completer, last_was_tab) {
            Ok(CompletionOutcome::Extended | CompletionOutcome::Replaced) => true,
            Ok(CompletionOutcome::Listing(candidates)) => {
                self.emit(SessionEvent::Completions(candidates));
                // The host prints the listing below the line.
                self.prev_rows = 0;
                true
            }
            Ok(CompletionOutcome::NoCandidates | CompletionOutcome::Unchanged) => false,
            Err(err) => {
                warn!(target: "session", error = %err, "completer_failed");
                self.errors.completion(err);
                false
            }
        }
    }

    fn commit_line(&mut self) {
        let line = self.buffer.commit();
        self.search = None;
        self.prev_key = None;
        self.prev_rows = 0;
        let recorded = self.history.record(&line);
        debug!(
            target: "session",
            chars = line.chars().count(),
            recorded,
            "line_committed"
        );
        if recorded {
            self.emit(SessionEvent::History(self.history.to_vec()));
        }
        match self.question.take() {
            Some(pending) => self.answer_question(pending, line),
            None => self.emit(SessionEvent::Line(line)),
        }
    }

    fn answer_question(&mut self, pending: PendingQuestion, line: String) {
        self.prompt = pending.saved_prompt;
        let answer = pending.answer;
        let outcome = catch_unwind(AssertUnwindSafe(move || answer(line)));
        let failure: Option<QuestionError> = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.into()),
            Err(_) => Some("question callback panicked".into()),
        };
        if let Some(err) = failure {
            warn!(target: "session", error = %err, "question_callback_failed");
            self.errors.question(err);
        }
    }

    fn emit_refresh(&mut self, clear_screen: bool) {
        let refresh = self.snapshot(clear_screen);
        self.prev_rows = refresh.cursor.row;
        self.emit(SessionEvent::Refresh(refresh));
    }

    fn emit(&mut self, event: SessionEvent) {
        trace!(target: "session", kind = event.kind_label(), "event_emitted");
        let failure = self.listeners.dispatch(&event);
        self.errors.observer(failure);
    }

    fn close_inner(&mut self) {
        if self.closed {
            return;
        }
        self.pause_inner();
        self.closed = true;
        self.held.clear();
        if self.question.take().is_some() {
            debug!(target: "session", "question_dropped");
        }
        self.decoder.reset();
        self.newline.cancel();
        self.keys.reset();
        self.buffer.clear();
        self.history.reset_navigation();
        self.search = None;
        info!(target: "session", history_len = self.history.len(), "session_closed");
        self.emit(SessionEvent::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Completion;
    use std::time::Duration;

    #[test]
    fn invalid_config_fails_construction() {
        let err = Session::new(SessionConfig::new().with_tab_size(0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTabSize(0)));
    }

    #[test]
    fn earliest_deadline_wins() {
        let t0 = Instant::now();
        let mut s = Session::new(SessionConfig::new()).unwrap();
        assert_eq!(s.next_deadline(), None);
        s.feed_at(b"a\r", t0).unwrap();
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(100)));
        s.expire(t0 + Duration::from_millis(100)).unwrap();
        s.feed_at(b"\x1b", t0 + Duration::from_millis(200)).unwrap();
        assert_eq!(
            s.next_deadline(),
            Some(t0 + Duration::from_millis(700))
        );
    }

    #[test]
    fn completion_error_takes_precedence_over_observer_error() {
        let mut s = Session::builder()
            .completer(|_: &str| -> anyhow::Result<Completion> { anyhow::bail!("no index") })
            .build()
            .unwrap();
        s.on_keypress(|_| anyhow::bail!("observer down"));
        let err = s.feed(b"ab\t").unwrap_err();
        assert!(matches!(err, SessionError::Completion(_)), "{err}");
        // Input after the failures was still applied.
        assert_eq!(s.line(), "ab");
    }

    #[test]
    fn debug_output_skips_line_content() {
        let mut s = Session::new(SessionConfig::new()).unwrap();
        s.feed(b"secret").unwrap();
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("len: 6"));
    }
}
