use log::debug;

use super::{
    inline::scan_inline,
    kinds::{CodeFence, FenceMarker, MathBlock, MathLine},
    span::{ProtectedKind, ProtectedSpan},
};

/// Protected-region state between lines.
///
/// Inline code and link targets cannot cross a line end, so they have no
/// state here: [`scan_inline`] finds them within the line it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    Normal,
    InFence(FenceMarker),
    InMathBlock,
}

impl RegionState {
    /// The protected kind this state stands for, if any.
    pub fn kind(self) -> Option<ProtectedKind> {
        match self {
            RegionState::Normal => None,
            RegionState::InFence(_) => Some(ProtectedKind::CodeFence),
            RegionState::InMathBlock => Some(ProtectedKind::MathBlock),
        }
    }

    /// Rebuilds a between-lines state from its stored parts.
    ///
    /// A fence kind without its marker cannot be resumed exactly; it falls
    /// back to the shortest backtick fence.
    pub fn resume(open: Option<ProtectedKind>, marker: Option<FenceMarker>) -> Self {
        match (open, marker) {
            (Some(ProtectedKind::CodeFence), Some(m)) => RegionState::InFence(m),
            (Some(ProtectedKind::CodeFence), None) => RegionState::InFence(FenceMarker {
                kind: super::kinds::FenceKind::Backticks,
                len: CodeFence::MIN_LEN,
            }),
            (Some(ProtectedKind::MathBlock), _) => RegionState::InMathBlock,
            _ => RegionState::Normal,
        }
    }

    pub fn fence_marker(self) -> Option<FenceMarker> {
        match self {
            RegionState::InFence(m) => Some(m),
            _ => None,
        }
    }
}

/// How a single line is to be treated by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineScan {
    /// The whole line belongs to a block region (or is one of its
    /// delimiters) and passes through unchanged.
    Verbatim(ProtectedKind),
    /// Ordinary text with the given same-line protected spans.
    Text(Vec<ProtectedSpan>),
}

/// A region still open when input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRegion {
    pub kind: ProtectedKind,
    /// 1-based line number of the opening delimiter.
    pub opened_at: usize,
}

/// Line-by-line protected-region state machine.
///
/// Feed it every line of a document in order, without line terminators.
#[derive(Debug, Clone, Default)]
pub struct LineTracker {
    state: RegionState,
    opened_at: usize,
    line_number: usize,
}

impl LineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues tracking from a state saved between chunks.
    pub fn resume(state: RegionState, opened_at: usize, line_number: usize) -> Self {
        Self {
            state,
            opened_at,
            line_number,
        }
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    /// 1-based number of the last line scanned; 0 before the first.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn opened_at(&self) -> usize {
        self.opened_at
    }

    pub fn scan_line(&mut self, line: &str) -> LineScan {
        self.line_number += 1;

        match self.state {
            RegionState::InFence(marker) => {
                if CodeFence::closes(marker, line) {
                    self.transition(RegionState::Normal);
                }
                LineScan::Verbatim(ProtectedKind::CodeFence)
            }
            RegionState::InMathBlock => {
                if MathBlock::closes(line) {
                    self.transition(RegionState::Normal);
                }
                LineScan::Verbatim(ProtectedKind::MathBlock)
            }
            RegionState::Normal => {
                if let Some(marker) = CodeFence::open(line) {
                    self.transition(RegionState::InFence(marker));
                    return LineScan::Verbatim(ProtectedKind::CodeFence);
                }
                match MathBlock::line(line) {
                    Some(MathLine::Toggle) => {
                        self.transition(RegionState::InMathBlock);
                        LineScan::Verbatim(ProtectedKind::MathBlock)
                    }
                    Some(MathLine::SelfContained) => LineScan::Verbatim(ProtectedKind::MathBlock),
                    None => LineScan::Text(scan_inline(line)),
                }
            }
        }
    }

    /// Ends the document. Returns the region left open, if any, and resets
    /// to `Normal`.
    pub fn finish(&mut self) -> Option<OpenRegion> {
        let open = match self.state {
            RegionState::Normal => None,
            open => open.kind().map(|kind| OpenRegion {
                kind,
                opened_at: self.opened_at,
            }),
        };
        self.state = RegionState::Normal;
        open
    }

    fn transition(&mut self, next: RegionState) {
        debug!(
            "line {}: {:?} -> {:?}",
            self.line_number, self.state, next
        );
        if next != RegionState::Normal {
            self.opened_at = self.line_number;
        }
        self.state = next;
    }
}
