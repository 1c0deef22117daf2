use log::{debug, trace};

use crate::error::{SpacerError, StructuralWarning};
use crate::protect::{LineScan, LineTracker, OpenRegion, ProtectedKind};
use crate::rules::{ClassifiedLine, FormatOptions, SpacingEngine};

use super::line::{FormattedLine, split_ending};
use super::residual::ResidualState;
use super::utf8::{self, Decoded};

/// Lines completed by one chunk, plus the state to pass with the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkOutput {
    pub lines: Vec<FormattedLine>,
    pub residual: ResidualState,
    pub warnings: Vec<StructuralWarning>,
}

impl ChunkOutput {
    /// Appends every line, with its terminator, to `out`.
    pub fn write_to(&self, out: &mut String) {
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
    }
}

/// Formats a document piece by piece.
///
/// Feeding the pieces of any split of a document in order, threading the
/// residual through, yields the same lines as feeding it whole.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    engine: SpacingEngine,
}

impl Chunker {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            engine: SpacingEngine::new(options),
        }
    }

    pub fn feed(&self, residual: ResidualState, text: &str, is_final: bool) -> ChunkOutput {
        let mut residual = residual;
        let mut tracker = residual.tracker();
        let mut lines = Vec::new();
        let mut warnings = Vec::new();

        // The carried tail holds no terminator, so only the new text is searched.
        let mut buf = std::mem::take(&mut residual.pending_tail);
        let mut from = buf.len();
        buf.push_str(text);

        let mut consumed = 0;
        while let Some(nl) = buf[from..].find('\n') {
            let end = from + nl + 1;
            lines.push(self.format_line(&mut tracker, &buf[consumed..end]));
            consumed = end;
            from = end;
        }

        if is_final {
            if consumed < buf.len() {
                lines.push(self.format_line(&mut tracker, &buf[consumed..]));
            }
            if let Some(open) = tracker.finish() {
                let warning = to_warning(open);
                debug!("{warning}");
                warnings.push(warning);
            }
        } else {
            buf.drain(..consumed);
            residual.pending_tail = buf;
        }

        residual.record(&tracker);
        trace!(
            "chunk: {} lines out, {} bytes pending",
            lines.len(),
            residual.pending_tail.len()
        );
        ChunkOutput {
            lines,
            residual,
            warnings,
        }
    }

    /// Like [`Chunker::feed`] for raw bytes. A character split by the chunk
    /// boundary waits in the residual.
    pub fn feed_bytes(
        &self,
        residual: ResidualState,
        bytes: &[u8],
        is_final: bool,
    ) -> Result<ChunkOutput, SpacerError> {
        let mut residual = residual;
        let pending = std::mem::take(&mut residual.pending_bytes);

        match utf8::decode(&pending, bytes, is_final) {
            Decoded::Text { text, carry } => {
                residual.offset += text.len() as u64;
                let mut output = self.feed(residual, &text, is_final);
                output.residual.pending_bytes = carry;
                Ok(output)
            }
            Decoded::Invalid { at } => Err(SpacerError::InvalidEncoding {
                offset: residual.offset + at as u64,
            }),
        }
    }

    fn format_line(&self, tracker: &mut LineTracker, line: &str) -> FormattedLine {
        let (body, ending) = split_ending(line);
        let text = match tracker.scan_line(body) {
            LineScan::Verbatim(_) => body.to_string(),
            LineScan::Text(spans) => self.engine.apply_rules(&ClassifiedLine::new(body, spans)),
        };
        FormattedLine { text, ending }
    }
}

fn to_warning(open: OpenRegion) -> StructuralWarning {
    match open.kind {
        ProtectedKind::MathBlock => StructuralWarning::UnterminatedMathBlock {
            line: open.opened_at,
        },
        _ => StructuralWarning::UnterminatedFence {
            line: open.opened_at,
        },
    }
}
