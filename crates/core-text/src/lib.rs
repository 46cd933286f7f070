//! Text primitives for the line editor: byte-chunk decoding, display width,
//! control-sequence stripping, cursor math, and word-boundary motions.
//!
//! Everything here is pure and free of session state so the higher crates can
//! call it from any point in the feed pipeline.

pub mod ansi;
pub mod cursor;
pub mod decode;
pub mod motion;
pub mod width;

pub use ansi::strip_control_sequences;
pub use cursor::{DisplayPos, Layout, cursor_position, cursor_position_with, display_pos};
pub use decode::ChunkDecoder;
pub use width::{char_width, display_width, is_wide_char, is_wide_code_point, is_zero_width};
