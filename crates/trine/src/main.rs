//! Trine CLI - three-pane diff and merge viewer

mod config;
mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use report::Format;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trine_core::{BufferRole, Buffers, CopyDirection, Granularity, MergeSession, Refresh};

#[derive(Parser, Debug)]
#[command(name = "trine")]
#[command(author, version, about = "A three-pane diff and merge viewer")]
struct Args {
    /// Left file (use /dev/null for an empty pane)
    left: PathBuf,

    /// Common file, the pane copies are merged into
    common: PathBuf,

    /// Right file
    right: PathBuf,

    /// Region granularity: specific or broad
    #[arg(short, long, value_enum)]
    granularity: Option<CliGranularity>,

    /// Skip showing regions when a pass yields more than this many
    #[arg(long)]
    max_diffs: Option<usize>,

    /// Report format: text or json
    #[arg(short, long, value_enum)]
    format: Option<CliFormat>,

    /// Copy a region into common, applied in order: ltr:INDEX or rtl:INDEX
    #[arg(short, long = "copy", value_parser = parse_copy)]
    copies: Vec<(CopyDirection, usize)>,

    /// Write the merged common pane to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of the discovered one
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliGranularity {
    /// Only merge regions that touch
    Specific,
    /// Also merge regions one line apart
    Broad,
}

impl From<CliGranularity> for Granularity {
    fn from(granularity: CliGranularity) -> Self {
        match granularity {
            CliGranularity::Specific => Granularity::Specific,
            CliGranularity::Broad => Granularity::Broad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliFormat {
    Text,
    Json,
}

impl From<CliFormat> for Format {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => Format::Text,
            CliFormat::Json => Format::Json,
        }
    }
}

fn parse_copy(value: &str) -> Result<(CopyDirection, usize)> {
    let (direction, index) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("expected DIRECTION:INDEX, got {value:?}"))?;
    let direction = match direction {
        "ltr" | "left" => CopyDirection::LeftToCommon,
        "rtl" | "right" => CopyDirection::RightToCommon,
        other => bail!("unknown copy direction {other:?} (use ltr or rtl)"),
    };
    let index = index
        .parse()
        .with_context(|| format!("invalid region index {index:?}"))?;
    Ok((direction, index))
}

/// Read a pane's file. /dev/null stands for an absent pane.
fn read_pane(role: BufferRole, path: &Path) -> Result<Option<String>> {
    if path == Path::new("/dev/null") {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .context(format!("Failed to read {} file: {}", role, path.display()))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = config::Config::load(args.config.as_deref())?;

    let mut options = config.diff_options();
    if let Some(granularity) = args.granularity {
        options.granularity = granularity.into();
    }
    if let Some(max_diffs) = args.max_diffs {
        options.max_diffs = max_diffs;
    }
    let format = args
        .format
        .map(Format::from)
        .or(config.output.format)
        .unwrap_or(Format::Text);

    let left = read_pane(BufferRole::Left, &args.left)?;
    let common = read_pane(BufferRole::Common, &args.common)?;
    let right = read_pane(BufferRole::Right, &args.right)?;
    let buffers = Buffers::from_contents(left.as_deref(), common.as_deref(), right.as_deref());

    let mut session = MergeSession::new(buffers, options);

    for &(direction, index) in &args.copies {
        if let Refresh::Skipped { count, max } = session.last_refresh() {
            bail!("cannot copy: the last pass found {count} regions (max {max})");
        }
        session
            .copy(direction, index)
            .with_context(|| format!("Failed to copy region {index}"))?;
    }

    tracing::debug!(
        regions = session.num_diffs(),
        identical = session.diff().is_empty(),
        copies = args.copies.len(),
        "final pass"
    );
    if let Refresh::Skipped { count, max } = session.last_refresh() {
        eprintln!("trine: {count} regions exceed the limit of {max}; nothing to show");
    }

    match format {
        Format::Text => print!("{}", report::render_text(session.diff(), session.options())),
        Format::Json => println!(
            "{}",
            report::render_json(session.diff(), session.options())
                .context("Failed to serialize report")?
        ),
    }

    if let Some(path) = &args.output {
        std::fs::write(path, session.buffer(BufferRole::Common).as_str())
            .context(format!("Failed to write merged file: {}", path.display()))?;
    }

    Ok(())
}
