//! # Spacing Rules
//!
//! Decides, for every gap between two visible atoms of a line, whether to
//! keep it, insert one space or collapse it to one space.
//!
//! A line is first split into atoms ([`atom`]): protected spans, exception
//! tokens ([`tokens`]), emphasis delimiters from paired quotes ([`quotes`])
//! and single characters. The ordered rule table ([`table`]) is then consulted
//! per gap and the first matching rule wins.
//!
//! Tokens drop their own inner spaces (`v 1.2.3`, `src / main. rs`); rules
//! only ever insert a space where there was none, or shrink a run of
//! whitespace to one space. A second pass over formatted text finds the
//! same atoms and changes nothing.

pub mod atom;
mod engine;
pub mod quotes;
pub mod table;
pub mod tokens;

pub use engine::{ClassifiedLine, FormatOptions, SpacingEngine};
pub use table::{Action, Gap, RULES, SpacingRule};
pub use tokens::{ExceptionToken, TokenKind, find_tokens};
