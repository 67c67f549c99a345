//! Row filters for the cleaning steps.
//!
//! Every filter is stable: survivors keep their relative input order and
//! nothing is ever sorted. An empty result is a valid outcome, not an error.

pub mod count;
pub mod required;
pub mod year;

pub use count::{filter_min_count, filter_min_count_with_stats};
pub use required::{drop_invalid_required, drop_missing_required};
pub use year::{filter_year_range, filter_year_range_with_stats};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The narrowing steps applied to the table, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanStep {
    /// Lines with the wrong number of fields or invalid UTF-8.
    ParseLines,
    /// Raw `year`, `tag` or `count` missing.
    MissingRequired,
    /// `year` or `count` not numeric after coercion.
    InvalidRequired,
    /// `year` outside the configured bounds.
    YearRange,
    /// `count` below the configured minimum.
    MinCount,
}

impl CleanStep {
    pub fn label(self) -> &'static str {
        match self {
            CleanStep::ParseLines => "parse lines",
            CleanStep::MissingRequired => "missing year/tag/count",
            CleanStep::InvalidRequired => "non-numeric year/count",
            CleanStep::YearRange => "year range",
            CleanStep::MinCount => "min count",
        }
    }
}

impl fmt::Display for CleanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a filtering step with statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Which step produced these numbers.
    pub step: CleanStep,
    /// Number of rows before filtering.
    pub n_before: usize,
    /// Number of rows after filtering.
    pub n_after: usize,
    /// Number of rows removed.
    pub n_removed: usize,
    /// Proportion of rows retained (1.0 when there was nothing to filter).
    pub retention_rate: f64,
}

impl FilterResult {
    pub fn new(step: CleanStep, n_before: usize, n_after: usize) -> Self {
        let retention_rate = if n_before == 0 {
            1.0
        } else {
            n_after as f64 / n_before as f64
        };
        Self {
            step,
            n_before,
            n_after,
            n_removed: n_before.saturating_sub(n_after),
            retention_rate,
        }
    }
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {:>8} -> {:>8} rows ({} removed, {:.1}% retained)",
            self.step.label(),
            self.n_before,
            self.n_after,
            self.n_removed,
            self.retention_rate * 100.0
        )
    }
}
