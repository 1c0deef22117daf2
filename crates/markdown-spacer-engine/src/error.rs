use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum SpacerError {
    #[error("Invalid UTF-8 at byte {offset}")]
    InvalidEncoding { offset: u64 },
    #[error("Read error: {0}")]
    Read(#[source] std::io::Error),
    #[error("Write error: {0}")]
    Write(#[source] std::io::Error),
}

/// A structural problem found at end of input. The output is still
/// produced; the affected lines were passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralWarning {
    UnterminatedFence { line: usize },
    UnterminatedMathBlock { line: usize },
}

impl StructuralWarning {
    /// 1-based line of the opening delimiter.
    pub fn line(self) -> usize {
        match self {
            StructuralWarning::UnterminatedFence { line }
            | StructuralWarning::UnterminatedMathBlock { line } => line,
        }
    }
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::UnterminatedFence { line } => {
                write!(f, "code fence opened at line {line} is never closed")
            }
            StructuralWarning::UnterminatedMathBlock { line } => {
                write!(f, "math block opened at line {line} is never closed")
            }
        }
    }
}
