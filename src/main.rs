//! Gapfill CLI entry point
//!
//! Joins an annotated segment table into a gapless partition of its range.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gapfill::core::{reconcile, ReconcileConfig, TierField, DEFAULT_FALLBACK_TAG};
use gapfill::formats::{self, DEFAULT_SEPARATOR};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Column the fallback tag is matched against (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum TierFieldArg {
    /// First column
    #[default]
    #[value(name = "category")]
    Category,
    /// Second column
    #[value(name = "name")]
    Name,
}

impl From<TierFieldArg> for TierField {
    fn from(arg: TierFieldArg) -> Self {
        match arg {
            TierFieldArg::Category => TierField::Category,
            TierFieldArg::Name => TierField::Name,
        }
    }
}

#[derive(Parser)]
#[command(name = "gapfill")]
#[command(about = "Reconcile overlapping, incomplete annotated segments into a gapless partition")]
#[command(version)]
#[command(author = "Gapfill Contributors")]
struct Cli {
    /// Input segment table (category, name, start, end)
    file_path: PathBuf,

    /// The name of the resulting file
    #[arg(short = 'f', long = "result_file_name", default_value = "joined")]
    result_file_name: PathBuf,

    /// Column separator for input and output
    #[arg(short = 's', long = "column_separator", default_value = DEFAULT_SEPARATOR)]
    column_separator: String,

    /// Tag marking the fallback (conserved region) tier
    #[arg(long = "fallback-tag", default_value = DEFAULT_FALLBACK_TAG)]
    fallback_tag: String,

    /// Column the fallback tag is matched against
    #[arg(long = "fallback-field", default_value = "category")]
    fallback_field: TierFieldArg,

    /// Write unfillable gaps to this file
    #[arg(short = 'g', long = "gaps-file")]
    gaps_file: Option<PathBuf>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let start = Instant::now();
    let separator = formats::unescape_separator(&cli.column_separator);
    let config = ReconcileConfig::with_fallback(cli.fallback_field.into(), cli.fallback_tag);

    eprintln!("Reading segments: {:?}", cli.file_path);
    let rows = formats::read_segments(&cli.file_path, &separator)
        .with_context(|| format!("Failed to read {:?}", cli.file_path))?;

    let result = reconcile(rows, &config);

    if !result.is_complete() {
        eprintln!("Could not fill all gaps");
        for gap in &result.unfillable {
            eprintln!("  uncovered: {}", gap);
        }
    }

    eprintln!("Writing joined segments: {:?}", cli.result_file_name);
    formats::write_segments(&cli.result_file_name, &result.segments, &separator)
        .with_context(|| format!("Failed to write {:?}", cli.result_file_name))?;

    if let Some(gaps_path) = &cli.gaps_file {
        formats::write_gaps(gaps_path, &result.unfillable)
            .with_context(|| format!("Failed to write {:?}", gaps_path))?;
    }

    let stats = &result.stats;
    eprintln!("\n=== Reconciliation Statistics ===");
    if let Some(range) = result.range {
        eprintln!("Range:           {}-{}", range.start, range.end);
    }
    eprintln!("Input segments:  {}", stats.input);
    eprintln!("  - Primary:     {}", stats.primary);
    eprintln!("  - Fallback:    {}", stats.fallback);
    eprintln!("Trimmed:         {}", stats.trimmed);
    eprintln!("Gaps found:      {}", stats.primary_gaps);
    eprintln!("Primary fillers: {}", stats.primary_fillers);
    eprintln!("Fallback fillers:{}", stats.fallback_fillers);
    eprintln!("Unfillable:      {} ({} coordinates)", stats.unfillable, stats.unfillable_bases);
    eprintln!("Output segments: {}", result.segments.len());
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.file_path.exists() {
        eprintln!("File path does not exist");
        return ExitCode::from(1);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
