use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use markdown_spacer_config::Config;
use markdown_spacer_engine::{FormatOptions, ProcessingOptions, Processor};
use std::path::PathBuf;
use std::process;

mod io;
mod run;

#[derive(Parser, Debug)]
#[command(
    name = "markdown-spacer",
    about = "Add spaces between Chinese, English and numbers in Markdown",
    long_about = "Add spaces between Chinese, English and numbers in Markdown.\n\
                  \n\
                  Code blocks, inline code, math, link targets and HTML tags are left as they are.\n\
                  With no INPUT, reads standard input and writes standard output.",
    version
)]
struct Args {
    /// Input file or directory (default: stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Input file or directory
    #[arg(short = 'i', long = "input", value_name = "INPUT", conflicts_with = "input")]
    input_flag: Option<PathBuf>,

    /// Output file (only for single file processing)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Create <file>.bak before writing
    #[arg(short, long)]
    backup: bool,

    /// Make Chinese double-quoted text bold
    #[arg(short = 'q', long)]
    bold_quotes: bool,

    /// Show detailed processing information
    #[arg(short, long)]
    verbose: bool,

    /// Config file (default: ~/.config/markdown-spacer/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Chunk size in bytes for mid-sized files
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn effective_config(args: &Args) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref())?;
    config.recursive |= args.recursive;
    config.backup |= args.backup;
    config.bold_chinese_quotes |= args.bold_quotes;
    if let Some(n) = args.chunk_size {
        config.chunk_size_bytes = n;
    }
    config.validate()?;
    Ok(config)
}

fn processing_options(config: &Config) -> ProcessingOptions {
    ProcessingOptions {
        chunk_size_bytes: config.chunk_size_bytes,
        small_file_threshold_bytes: config.small_file_threshold_bytes,
        large_file_threshold_bytes: config.large_file_threshold_bytes,
        format: FormatOptions {
            bold_chinese_quotes: config.bold_chinese_quotes,
        },
    }
}

/// Returns whether every input was formatted.
fn run(args: Args) -> Result<bool> {
    let config = effective_config(&args)?;
    let processor = Processor::new(processing_options(&config));

    let Some(input) = args.input.or(args.input_flag) else {
        run::format_stdin(&processor)?;
        return Ok(true);
    };

    if input.is_file() {
        run::format_file(&processor, &input, args.output.as_deref(), config.backup)?;
        info!("Successfully processed: {}", input.display());
        Ok(true)
    } else if input.is_dir() {
        if args.output.is_some() {
            bail!("--output only applies to a single input file");
        }
        let batch = run::format_directory(&processor, &input, config.recursive, config.backup)?;
        info!(
            "Processed {} files, {} failed",
            batch.processed,
            batch.failed.len()
        );
        Ok(batch.failed.is_empty())
    } else {
        bail!("Input not found: {}", input.display());
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::error!("{e:#}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn positional_and_flag_input_conflict() {
        let result = Args::try_parse_from(["markdown-spacer", "a.md", "-i", "b.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from(["markdown-spacer", "-q", "-r", "--chunk-size", "64"])
            .unwrap();
        let mut config = Config::default();
        config.bold_chinese_quotes |= args.bold_quotes;
        config.recursive |= args.recursive;
        let options = processing_options(&Config {
            chunk_size_bytes: args.chunk_size.unwrap(),
            ..config
        });
        assert!(options.format.bold_chinese_quotes);
        assert_eq!(options.chunk_size_bytes, 64);
    }
}
