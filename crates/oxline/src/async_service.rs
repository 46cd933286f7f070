//! Tokio driver for a [`Session`].
//!
//! The driver owns the session while it runs and multiplexes three sources:
//! a shutdown signal, the next input chunk and the session's earliest timer.
//! Timer wakes call `expire`; the end of the stream calls `end`. Session
//! errors are logged and do not stop the driver. Time is read from
//! `tokio::time::Instant` so deadlines and wakes share one clock.

use std::io;
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task;
use tokio::time::Instant;
use tokio_stream::{Stream, StreamExt};
use tracing::{Instrument, info, warn};

use crate::event::SessionError;
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct SessionShutdown {
    notify: Arc<Notify>,
}

impl SessionShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
pub struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    async fn wait(&self) {
        self.notify.notified().await;
    }
}

pub fn shutdown_pair() -> (SessionShutdown, ShutdownListener) {
    let notify = Arc::new(Notify::new());
    (
        SessionShutdown {
            notify: notify.clone(),
        },
        ShutdownListener { notify },
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    ShutdownSignal,
    StreamEnded,
    StreamError,
    SessionClosed,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
            ExitReason::SessionClosed => "session_closed",
        }
    }
}

enum Wake {
    Shutdown,
    Timer,
    Chunk(Option<io::Result<Vec<u8>>>),
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(Instant::from_std(d)).await,
        None => std::future::pending().await,
    }
}

fn log_session_error(err: &SessionError, during: &'static str) {
    warn!(target: "session.async", during, error = %err, "session_call_failed");
}

/// Drive `session` from `stream` until the stream ends or fails, the session
/// closes, or `shutdown` is signalled. Returns the session and why it
/// stopped.
pub async fn run_session<S>(
    mut session: Session,
    mut stream: S,
    shutdown: ShutdownListener,
) -> (Session, ExitReason)
where
    S: Stream<Item = io::Result<Vec<u8>>> + Unpin,
{
    info!(target: "session.async", "session_driver_started");
    let mut stream_error = None;
    let reason = loop {
        if session.is_closed() {
            break ExitReason::SessionClosed;
        }
        let wake = tokio::select! {
            biased;
            _ = shutdown.wait() => Wake::Shutdown,
            _ = sleep_until(session.next_deadline()) => Wake::Timer,
            chunk = stream.next() => Wake::Chunk(chunk),
        };
        match wake {
            Wake::Shutdown => break ExitReason::ShutdownSignal,
            Wake::Timer => {
                if let Err(err) = session.expire(Instant::now().into_std()) {
                    log_session_error(&err, "expire");
                }
            }
            Wake::Chunk(Some(Ok(bytes))) => {
                if let Err(err) = session.feed_at(&bytes, Instant::now().into_std()) {
                    log_session_error(&err, "feed");
                }
            }
            Wake::Chunk(Some(Err(err))) => {
                stream_error = Some(err.kind());
                break ExitReason::StreamError;
            }
            Wake::Chunk(None) => {
                if let Err(err) = session.end_at(Instant::now().into_std()) {
                    log_session_error(&err, "end");
                }
                break ExitReason::StreamEnded;
            }
        }
    };

    if let Some(kind) = stream_error {
        warn!(target: "session.async", error_kind = ?kind, "session_driver_stream_error");
    }
    info!(target: "session.async", reason = reason.as_str(), "session_driver_stopped");
    (session, reason)
}

/// Spawn [`run_session`] on the current runtime.
pub fn spawn_session<S>(
    session: Session,
    stream: S,
) -> (task::JoinHandle<(Session, ExitReason)>, SessionShutdown)
where
    S: Stream<Item = io::Result<Vec<u8>>> + Send + Unpin + 'static,
{
    let (shutdown, listener) = shutdown_pair();
    let span = tracing::debug_span!(target: "session.async", "session_driver");
    let handle = task::spawn(run_session(session, stream, listener).instrument(span));
    (handle, shutdown)
}
