//! # Chunked Formatting
//!
//! Formats a document delivered in arbitrary pieces. A line is formatted
//! only after its terminator arrives; everything after the last terminator
//! waits in [`ResidualState`] together with the open block region and any
//! incomplete UTF-8 sequence.

mod chunker;
mod line;
mod residual;
mod utf8;

pub use chunker::{ChunkOutput, Chunker};
pub use line::{FormattedLine, LineEnding};
pub use residual::ResidualState;
