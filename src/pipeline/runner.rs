//! The table cleaner: read, narrow step by step, write.

use crate::data::{CoercedRecord, Column, RawInput, YearlyTable};
use crate::error::{CleanError, Result};
use crate::filter::{
    drop_invalid_required, drop_missing_required, filter_min_count_with_stats,
    filter_year_range_with_stats, CleanStep, FilterResult,
};
use crate::pipeline::CleanConfig;
use crate::profile::{profile_table, TableProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// How many distinct years the progress output lists.
const YEAR_SAMPLE: usize = 5;

/// Everything the cleaner observed during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanReport {
    /// Bounds the run used.
    pub config: CleanConfig,
    /// Non-blank input lines seen.
    pub n_lines: usize,
    /// Per-step row counts, in execution order.
    pub steps: Vec<FilterResult>,
    /// Optional numeric fields nulled by coercion, per column.
    pub nulled_fields: BTreeMap<Column, usize>,
    /// Rows in the cleaned table.
    pub n_rows: usize,
    /// Profile of the cleaned table.
    pub profile: TableProfile,
}

impl CleanReport {
    /// Stats for one step, if it ran.
    pub fn step(&self, step: CleanStep) -> Option<&FilterResult> {
        self.steps.iter().find(|s| s.step == step)
    }

    /// Total rows dropped across all steps.
    pub fn n_dropped(&self) -> usize {
        self.steps.iter().map(|s| s.n_removed).sum()
    }

    /// Render the report in the requested format.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_string()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Clean Report")?;
        writeln!(
            f,
            "  Bounds: {} <= year <= {}, count >= {}",
            self.config.year_min, self.config.year_max, self.config.min_count
        )?;
        writeln!(f, "  Lines read: {}", self.n_lines)?;
        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }
        let nulled: Vec<String> = self
            .nulled_fields
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(c, n)| format!("{}={}", c, n))
            .collect();
        if !nulled.is_empty() {
            writeln!(f, "  Nulled fields: {}", nulled.join(", "))?;
        }
        writeln!(f, "  Rows kept: {} ({} dropped)", self.n_rows, self.n_dropped())?;
        write!(f, "{}", self.profile)
    }
}

/// Output format for a [`CleanReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

impl FromStr for ReportFormat {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(CleanError::InvalidParameter(format!(
                "unknown report format '{}' (expected text, json or yaml)",
                other
            ))),
        }
    }
}

/// Cleans yearly (year, tag) aggregation tables.
#[derive(Debug, Clone, Default)]
pub struct TableCleaner {
    config: CleanConfig,
}

impl TableCleaner {
    pub fn new(config: CleanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Run the in-memory cleaning steps over parsed input.
    ///
    /// Survivors keep their input order; their position in the returned
    /// table is their new 0-based ordinal.
    pub fn clean_records(&self, input: RawInput) -> (YearlyTable, CleanReport) {
        let CleanConfig {
            year_min,
            year_max,
            min_count,
        } = self.config;
        let mut steps = Vec::with_capacity(5);

        let parsed = FilterResult::new(CleanStep::ParseLines, input.n_lines, input.records.len());
        log_step(&parsed);
        steps.push(parsed);

        let (present, stats) = drop_missing_required(input.records);
        log_step(&stats);
        steps.push(stats);

        let coerced: Vec<CoercedRecord> = present.into_iter().map(|r| r.coerce()).collect();
        let nulled_fields = count_nulled(&coerced);

        let (typed, stats) = drop_invalid_required(coerced);
        log_step(&stats);
        steps.push(stats);

        let (in_range, stats) = filter_year_range_with_stats(&typed, year_min, year_max);
        log_step(&stats);
        steps.push(stats);

        let (table, stats) = filter_min_count_with_stats(&in_range, min_count);
        log_step(&stats);
        steps.push(stats);

        let report = CleanReport {
            config: self.config,
            n_lines: input.n_lines,
            steps,
            nulled_fields,
            n_rows: table.len(),
            profile: profile_table(&table),
        };
        (table, report)
    }

    /// Clean `input_path` into `output_path`, overwriting it.
    ///
    /// Progress is printed to stdout. The output is written even when no
    /// rows survive. Only I/O failures are errors.
    pub fn clean<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<CleanReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        println!("Loading input from: {}", input_path.display());
        let input = RawInput::from_tsv(input_path)?;
        debug!(
            lines = input.n_lines,
            malformed = input.n_malformed,
            "loaded raw input"
        );

        let (table, report) = self.clean_records(input);

        println!("After cleaning:");
        println!("  rows = {}", table.len());
        println!("  years = {:?} ...", report.profile.year_sample(YEAR_SAMPLE));

        table.to_tsv(output_path)?;
        println!("Saved cleaned data to: {}", output_path.display());
        info!(
            rows = report.n_rows,
            dropped = report.n_dropped(),
            output = %output_path.display(),
            "cleaning complete"
        );

        Ok(report)
    }
}

/// Clean a raw yearly aggregation file with explicit bounds.
///
/// Equivalent to `TableCleaner::new(CleanConfig::new(..)).clean(..)`.
pub fn clean<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    year_min: i64,
    year_max: i64,
    min_count: i64,
) -> Result<CleanReport> {
    TableCleaner::new(CleanConfig::new(year_min, year_max, min_count)).clean(input_path, output_path)
}

fn log_step(stats: &FilterResult) {
    debug!(
        step = %stats.step,
        before = stats.n_before,
        after = stats.n_after,
        removed = stats.n_removed,
        "step applied"
    );
}

fn count_nulled(records: &[CoercedRecord]) -> BTreeMap<Column, usize> {
    Column::OPTIONAL_NUMERIC
        .iter()
        .map(|&c| (c, records.iter().filter(|r| r.is_null(c)).count()))
        .collect()
}
