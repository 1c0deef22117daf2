use crate::classify::{CharClass, class_of};

use super::BlockQuote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn marker(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// The exact opening marker of a fenced block. Only a run of the same
/// character that is at least as long closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceMarker {
    pub kind: FenceKind,
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Recognizes a fence opener, returning its marker.
    ///
    /// A backtick fence's info string may not contain backticks, so
    /// ```` ```code``` ```` on one line is inline code, not a fence.
    pub fn open(line: &str) -> Option<FenceMarker> {
        let content = BlockQuote::content(line);
        let (kind, len) = Self::leading_run(content)?;
        if kind == FenceKind::Backticks && content[len..].contains('`') {
            return None;
        }
        Some(FenceMarker { kind, len })
    }

    /// Whether `line` closes a fence opened with `marker`.
    pub fn closes(marker: FenceMarker, line: &str) -> bool {
        let content = BlockQuote::content(line);
        match Self::leading_run(content) {
            Some((kind, len)) => {
                kind == marker.kind && len >= marker.len && content[len..].trim().is_empty()
            }
            None => false,
        }
    }

    fn leading_run(content: &str) -> Option<(FenceKind, usize)> {
        let first = *content.as_bytes().first()?;
        if class_of(first as char) != CharClass::Marker {
            return None;
        }
        let kind = match first {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = content
            .bytes()
            .take_while(|&b| b == kind.marker())
            .count();
        (len >= Self::MIN_LEN).then_some((kind, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(kind: FenceKind, len: usize) -> FenceMarker {
        FenceMarker { kind, len }
    }

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::open("```rust"),
            Some(marker(FenceKind::Backticks, 3))
        );
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::open("~~~~"), Some(marker(FenceKind::Tildes, 4)));
    }

    #[test]
    fn detect_indented_and_quoted_fence() {
        assert!(CodeFence::open("   ```").is_some());
        assert!(CodeFence::open("> ```python").is_some());
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``"), None);
    }

    #[test]
    fn inline_code_line_is_not_a_fence() {
        assert_eq!(CodeFence::open("```code``` and more"), None);
    }

    #[test]
    fn closes_matching_fence() {
        assert!(CodeFence::closes(marker(FenceKind::Backticks, 3), "```"));
        assert!(CodeFence::closes(marker(FenceKind::Backticks, 3), "`````  "));
        assert!(CodeFence::closes(marker(FenceKind::Tildes, 3), "~~~"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(!CodeFence::closes(marker(FenceKind::Backticks, 3), "~~~"));
        assert!(!CodeFence::closes(marker(FenceKind::Tildes, 3), "```"));
    }

    #[test]
    fn shorter_run_does_not_close() {
        assert!(!CodeFence::closes(marker(FenceKind::Backticks, 4), "```"));
    }

    #[test]
    fn closer_cannot_carry_an_info_string() {
        assert!(!CodeFence::closes(marker(FenceKind::Backticks, 3), "```rust"));
    }
}
