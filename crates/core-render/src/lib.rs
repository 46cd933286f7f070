//! Line redraw planning and terminal command output.
//!
//! The session never writes to a device. It hands the host a `Refresh`
//! describing the prompt, the line and the cursor/end display positions;
//! `Refresh::plan` turns that into an ordered `Command` list and
//! `Writer::flush_to` renders the list with crossterm onto any `Write`.

pub mod refresh;
pub mod writer;

pub use refresh::{Refresh, RefreshPlan};
pub use writer::{Command, Writer};
