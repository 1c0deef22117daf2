//! # Protected Regions
//!
//! Finds the parts of a Markdown document that spacing rules must leave
//! byte-for-byte alone.
//!
//! ## Modules
//!
//! - **`span`**: `ProtectedSpan` and `ProtectedKind`
//! - **`kinds`**: delimiter knowledge per region type (fences, math, code spans, links, HTML)
//! - **`cursor`**: byte `Cursor` for delimiter scanning
//! - **`inline`**: `scan_inline()` for same-line spans
//! - **`tracker`**: `LineTracker`, the cross-line state machine
//!
//! ## Key Invariants
//!
//! - Fenced code and `$$` math blocks are raw zones: every line from opener to
//!   closer, delimiters included, passes through unchanged
//! - Only fences and math blocks stay open across a line end
//! - A fence closes only on the same marker character with a run at least as long

pub mod cursor;
pub mod inline;
pub mod kinds;
pub mod span;
pub mod tracker;

pub use inline::scan_inline;
pub use kinds::{FenceKind, FenceMarker};
pub use span::{ProtectedKind, ProtectedSpan};
pub use tracker::{LineScan, LineTracker, OpenRegion, RegionState};
