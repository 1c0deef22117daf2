//! # Processing Strategy
//!
//! Picks how a document is driven through the [`Chunker`] based on its size,
//! and runs it over caller-supplied reader and writer handles. Every strategy
//! produces byte-identical output; they differ only in how much input is held
//! in memory at once.

use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};

use log::debug;

use crate::chunk::{ChunkOutput, Chunker, ResidualState};
use crate::error::{SpacerError, StructuralWarning};
use crate::rules::FormatOptions;

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub chunk_size_bytes: usize,
    pub small_file_threshold_bytes: u64,
    pub large_file_threshold_bytes: u64,
    pub format: FormatOptions,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            chunk_size_bytes: MIB as usize,
            small_file_threshold_bytes: MIB,
            large_file_threshold_bytes: 10 * MIB,
            format: FormatOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStrategy {
    /// Read everything, format once.
    WholeBuffer,
    /// Fixed-size byte chunks.
    Chunked { chunk_size: usize },
    /// One line at a time, for very large or unsized input.
    Streaming,
}

/// Chooses a strategy from the input size; `None` means unknown (stdin).
pub fn select_strategy(total_bytes: Option<u64>, options: &ProcessingOptions) -> ProcessingStrategy {
    match total_bytes {
        Some(n) if n <= options.small_file_threshold_bytes => ProcessingStrategy::WholeBuffer,
        Some(n) if n <= options.large_file_threshold_bytes => ProcessingStrategy::Chunked {
            chunk_size: options.chunk_size_bytes.max(1),
        },
        _ => ProcessingStrategy::Streaming,
    }
}

/// Reported after every unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub bytes_consumed: u64,
    pub total_bytes: Option<u64>,
}

impl Progress {
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_consumed as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub strategy: ProcessingStrategy,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub lines: usize,
    pub warnings: Vec<StructuralWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: ProcessingOptions,
    chunker: Chunker,
}

struct Sink<W: Write> {
    writer: W,
    report: RunReport,
}

impl<W: Write> Sink<W> {
    fn emit(&mut self, output: &ChunkOutput) -> Result<(), SpacerError> {
        for line in &output.lines {
            self.writer
                .write_all(line.text.as_bytes())
                .and_then(|()| self.writer.write_all(line.ending.as_str().as_bytes()))
                .map_err(SpacerError::Write)?;
            self.report.bytes_written += line.len() as u64;
        }
        self.report.lines += output.lines.len();
        self.report.warnings.extend(output.warnings.iter().copied());
        Ok(())
    }
}

impl Processor {
    pub fn new(options: ProcessingOptions) -> Self {
        Self {
            options,
            chunker: Chunker::new(options.format),
        }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Formats everything `reader` yields into `writer`.
    ///
    /// `total_bytes` selects the strategy and is echoed in every
    /// [`Progress`]. On error the writer may hold a partial document.
    pub fn run<R, W, F>(
        &self,
        reader: R,
        total_bytes: Option<u64>,
        writer: W,
        mut on_progress: F,
    ) -> Result<RunReport, SpacerError>
    where
        R: Read,
        W: Write,
        F: FnMut(Progress),
    {
        let strategy = select_strategy(total_bytes, &self.options);
        debug!("strategy {strategy:?} for {total_bytes:?} bytes");

        let mut sink = Sink {
            writer,
            report: RunReport {
                strategy,
                bytes_read: 0,
                bytes_written: 0,
                lines: 0,
                warnings: Vec::new(),
            },
        };
        let mut progress = |bytes_consumed| {
            on_progress(Progress {
                bytes_consumed,
                total_bytes,
            })
        };

        let mut units = 0usize;
        match strategy {
            ProcessingStrategy::WholeBuffer => {
                let mut reader = reader;
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(SpacerError::Read)?;
                sink.report.bytes_read = buf.len() as u64;
                let output = self.chunker.feed_bytes(ResidualState::new(), &buf, true)?;
                sink.emit(&output)?;
                units += 1;
                progress(sink.report.bytes_read);
            }
            ProcessingStrategy::Chunked { chunk_size } => {
                let mut reader = reader;
                let mut buf = vec![0u8; chunk_size];
                let mut residual = ResidualState::new();
                loop {
                    let n = fill(&mut reader, &mut buf).map_err(SpacerError::Read)?;
                    let is_final = n < buf.len();
                    sink.report.bytes_read += n as u64;
                    let output = self.chunker.feed_bytes(residual, &buf[..n], is_final)?;
                    sink.emit(&output)?;
                    residual = output.residual;
                    units += 1;
                    progress(sink.report.bytes_read);
                    if is_final {
                        break;
                    }
                }
            }
            ProcessingStrategy::Streaming => {
                let mut reader = BufReader::new(reader);
                let mut buf = Vec::new();
                let mut residual = ResidualState::new();
                loop {
                    buf.clear();
                    let n = reader
                        .read_until(b'\n', &mut buf)
                        .map_err(SpacerError::Read)?;
                    let is_final = n == 0;
                    sink.report.bytes_read += n as u64;
                    let output = self.chunker.feed_bytes(residual, &buf, is_final)?;
                    sink.emit(&output)?;
                    residual = output.residual;
                    units += 1;
                    progress(sink.report.bytes_read);
                    if is_final {
                        break;
                    }
                }
            }
        }

        sink.writer.flush().map_err(SpacerError::Write)?;
        debug!(
            "{units} units, {} bytes in, {} bytes out",
            sink.report.bytes_read, sink.report.bytes_written
        );
        Ok(sink.report)
    }
}

/// Reads until `buf` is full or the reader is exhausted.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
