//! Input stages between decoded characters and the session dispatcher.
//!
//! - [`NewlineDisambiguator`] finds line boundaries among `\n`, `\r\n` and
//!   bare `\r`, holding at most one CRLF deadline.
//! - [`KeypressDecoder`] turns characters and escape sequences into
//!   [`core_events::KeyPress`] values, holding at most one escape deadline.
//!
//! Both stages take the current instant explicitly so hosts and tests control
//! time; neither spawns timers.

mod keypress;
mod newline;

pub use keypress::{KeypressDecoder, token_for_char};
pub use newline::{NewlineDisambiguator, NewlineItem, PendingNewline};
