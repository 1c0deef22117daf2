/// The kind of a region that spacing rules must not touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectedKind {
    /// A fenced code block (``` or ~~~).
    CodeFence,
    /// An inline code span.
    InlineCode,
    /// The `(...)` target of a link or image.
    LinkTarget,
    /// A `$$` display math block.
    MathBlock,
    /// Same-line `$...$` or `$$...$$` math.
    InlineMath,
    /// An inline HTML tag or autolink `<...>`.
    HtmlTag,
}

/// A byte range `[start, end)` of the current line over which no spacing
/// rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: ProtectedKind,
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl ProtectedSpan {
    pub fn new(kind: ProtectedKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    #[must_use]
    pub fn encloses(self, other: ProtectedSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
