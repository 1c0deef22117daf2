//! Inserts spaces between CJK and Latin text in Markdown, leaving code,
//! math, link targets and HTML untouched.

pub mod chunk;
pub mod classify;
pub mod error;
pub mod protect;
pub mod rules;
pub mod strategy;

pub use chunk::{ChunkOutput, Chunker, FormattedLine, LineEnding, ResidualState};
pub use classify::{CharClass, classify};
pub use error::{SpacerError, StructuralWarning};
pub use rules::{ClassifiedLine, FormatOptions, SpacingEngine};
pub use strategy::{
    ProcessingOptions, ProcessingStrategy, Processor, Progress, RunReport, select_strategy,
};

/// A formatted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    pub warnings: Vec<StructuralWarning>,
}

/// Formats a whole document held in memory.
pub fn format_document(text: &str, options: &FormatOptions) -> Formatted {
    let output = Chunker::new(*options).feed(ResidualState::new(), text, true);
    let mut formatted = String::with_capacity(text.len() + text.len() / 8);
    output.write_to(&mut formatted);
    Formatted {
        text: formatted,
        warnings: output.warnings,
    }
}
