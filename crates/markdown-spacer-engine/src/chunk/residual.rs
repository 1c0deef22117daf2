use crate::protect::{FenceMarker, LineTracker, ProtectedKind, RegionState};

/// Everything carried from one chunk to the next.
///
/// `pending_tail` is the text after the last line terminator seen so far; it
/// is only formatted once its terminator arrives (or input ends), so a marker
/// or token cut by a chunk boundary is always seen whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidualState {
    pub pending_tail: String,
    /// Block region open at the end of the last complete line.
    pub open_protected: Option<ProtectedKind>,
    /// Opening marker when `open_protected` is a code fence.
    pub code_fence_marker: Option<FenceMarker>,
    /// Incomplete UTF-8 sequence at the end of the last byte chunk.
    pub pending_bytes: Vec<u8>,
    /// Number of complete lines seen.
    pub line_number: usize,
    /// Line that opened `open_protected`.
    pub opened_at_line: usize,
    /// Bytes decoded so far.
    pub offset: u64,
}

impl ResidualState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is waiting: no partial line, no partial character.
    pub fn is_drained(&self) -> bool {
        self.pending_tail.is_empty() && self.pending_bytes.is_empty()
    }

    pub(crate) fn tracker(&self) -> LineTracker {
        let state = RegionState::resume(self.open_protected, self.code_fence_marker);
        LineTracker::resume(state, self.opened_at_line, self.line_number)
    }

    pub(crate) fn record(&mut self, tracker: &LineTracker) {
        let state = tracker.state();
        self.open_protected = state.kind();
        self.code_fence_marker = state.fence_marker();
        self.line_number = tracker.line_number();
        self.opened_at_line = tracker.opened_at();
    }
}
