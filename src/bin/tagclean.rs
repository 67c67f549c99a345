//! tagclean - yearly (year, tag) aggregation cleaning CLI
//!
//! Reads the raw headerless nine-column TSV, drops malformed, out-of-range
//! and low-count rows, and writes a cleaned TSV with a header.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yearly_tag_clean::error::Result;
use yearly_tag_clean::pipeline::{CleanConfig, ReportFormat, TableCleaner};

/// CLI-friendly report format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(format: CliReportFormat) -> Self {
        match format {
            CliReportFormat::Text => ReportFormat::Text,
            CliReportFormat::Json => ReportFormat::Json,
            CliReportFormat::Yaml => ReportFormat::Yaml,
        }
    }
}

/// Clean a yearly tag aggregation table
#[derive(Parser)]
#[command(name = "tagclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the raw yearly aggregation TSV (no header, 9 columns)
    #[arg(long)]
    input: PathBuf,

    /// Path to write the cleaned TSV to (overwritten if present)
    #[arg(long)]
    output: PathBuf,

    /// Minimum year to keep, inclusive (default: 2008)
    #[arg(long, allow_negative_numbers = true)]
    year_min: Option<i64>,

    /// Maximum year to keep, inclusive (default: 2024)
    #[arg(long, allow_negative_numbers = true)]
    year_max: Option<i64>,

    /// Minimum count per (year, tag) row to keep, inclusive (default: 10)
    #[arg(long, allow_negative_numbers = true)]
    min_count: Option<i64>,

    /// YAML file with year_min / year_max / min_count; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a cleaning report after writing the output
    #[arg(long, value_enum)]
    report: Option<CliReportFormat>,

    /// Increase diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => CleanConfig::from_yaml_file(path)?,
        None => CleanConfig::default(),
    };
    let config = base.with_overrides(cli.year_min, cli.year_max, cli.min_count);

    let report = TableCleaner::new(config).clean(&cli.input, &cli.output)?;

    if let Some(format) = cli.report {
        println!("{}", report.render(format.into())?);
    }

    Ok(())
}
