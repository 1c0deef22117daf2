use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use markdown_spacer_engine::{Processor, Progress, RunReport};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::io::{IoError, backup_file, scan_markdown_files, write_atomically};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: Vec<PathBuf>,
}

fn report_progress(name: &str, progress: Progress) {
    match progress.fraction() {
        Some(f) => debug!("{name}: {:.0}%", f * 100.0),
        None => debug!("{name}: {} bytes", progress.bytes_consumed),
    }
}

fn log_warnings(name: &str, report: &RunReport) {
    for warning in &report.warnings {
        warn!("{name}: {warning}");
    }
}

/// stdin to stdout, always streaming.
pub fn format_stdin(processor: &Processor) -> Result<RunReport> {
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let report = processor
        .run(stdin, None, stdout, |p| report_progress("<stdin>", p))
        .context("Failed to format standard input")?;
    log_warnings("<stdin>", &report);
    Ok(report)
}

/// Formats `input` into `output`, or in place when there is no output.
pub fn format_file(
    processor: &Processor,
    input: &Path,
    output: Option<&Path>,
    backup: bool,
) -> Result<RunReport> {
    let target = output.unwrap_or(input);
    let name = input.display().to_string();

    let file = File::open(input).with_context(|| format!("Failed to open {name}"))?;
    let size = file.metadata().map(|m| m.len()).ok();

    if backup && target.exists() {
        let saved = backup_file(target)
            .with_context(|| format!("Failed to back up {}", target.display()))?;
        debug!("backup written to {}", saved.display());
    }

    let report = write_atomically(target, |writer| {
        processor
            .run(BufReader::new(file), size, writer, |p| report_progress(&name, p))
            .map_err(IoError::from)
    })
    .with_context(|| format!("Failed to format {name}"))?;

    log_warnings(&name, &report);
    debug!(
        "{name}: {:?}, {} lines, {} -> {} bytes",
        report.strategy, report.lines, report.bytes_read, report.bytes_written
    );
    Ok(report)
}

/// Formats every markdown file under `dir` in parallel. A failing file is
/// logged and counted; the others still run.
pub fn format_directory(
    processor: &Processor,
    dir: &Path,
    recursive: bool,
    backup: bool,
) -> Result<BatchReport> {
    let files = scan_markdown_files(dir, recursive)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    info!("Found {} markdown files in {}", files.len(), dir.display());

    let results: Vec<(PathBuf, Result<RunReport>)> = files
        .into_par_iter()
        .map(|path| {
            let result = format_file(processor, &path, None, backup);
            (path, result)
        })
        .collect();

    let mut batch = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(_) => batch.processed += 1,
            Err(e) => {
                error!("{e:#}");
                batch.failed.push(path);
            }
        }
    }
    Ok(batch)
}
