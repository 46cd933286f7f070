//! Line-editing state: the edit buffer with its undo engine and kill ring,
//! the history store, and the completer contract.
//!
//! Nothing here reads input or writes output. The session feeds decoded keys
//! in and reads text and cursor back for redraw.

pub mod completion;
pub mod edit;
pub mod history;
pub mod kill_ring;
pub mod undo;

pub use completion::{Completer, Completion, CompletionError, CompletionOutcome, common_prefix};
pub use edit::EditBuffer;
pub use history::{DEFAULT_HISTORY_SIZE, HistoryCursor, HistoryStore, NavDirection, Recall};
pub use kill_ring::{KILL_RING_MAX, KillRing};
pub use undo::{EditSnapshot, UNDO_HISTORY_MAX, UndoEngine};
