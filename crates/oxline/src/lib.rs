//! Interactive line editing over a raw terminal byte stream.
//!
//! A [`Session`] turns arbitrarily fragmented input chunks into committed
//! lines and key presses while keeping an editable buffer, history and
//! redraw information current:
//!
//! ```text
//! bytes -> ChunkDecoder -> NewlineDisambiguator -> KeypressDecoder
//!       -> key observers -> dispatch -> EditBuffer / HistoryStore / Completer
//!       -> SessionEvent listeners
//! ```
//!
//! The session does no IO. Hosts feed bytes, poll `next_deadline` (or use
//! [`run_session`] on tokio) and draw [`Refresh`] events with
//! [`Refresh::write_to`].

pub mod async_service;
pub mod dispatch;
mod event;
mod session;

pub use async_service::{
    ExitReason, SessionShutdown, ShutdownListener, run_session, shutdown_pair, spawn_session,
};
pub use event::{SessionError, SessionEvent};
pub use session::{Session, SessionBuilder};

pub use core_config::{ConfigError, SessionConfig};
pub use core_events::{KeyPress, KeyToken, ModMask, NamedKey, ObserverError, ObserverId};
pub use core_keymap::{KeySequenceTable, SequenceSpec};
pub use core_render::{Command, Refresh, RefreshPlan, Writer};
pub use core_state::{Completer, Completion, CompletionError};
pub use core_text::DisplayPos;
