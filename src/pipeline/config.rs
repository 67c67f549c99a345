//! Cleaning parameters and their YAML form.

use crate::error::{CleanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default inclusive lower year bound.
pub const DEFAULT_YEAR_MIN: i64 = 2008;
/// Default inclusive upper year bound; later years are synthetic.
pub const DEFAULT_YEAR_MAX: i64 = 2024;
/// Default inclusive minimum count per row.
pub const DEFAULT_MIN_COUNT: i64 = 10;

/// Bounds applied by the cleaner.
///
/// `year_min <= year_max` is not checked. Inverted bounds simply keep no
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Inclusive lower bound on `year`.
    pub year_min: i64,
    /// Inclusive upper bound on `year`.
    pub year_max: i64,
    /// Inclusive lower bound on `count`.
    pub min_count: i64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            year_min: DEFAULT_YEAR_MIN,
            year_max: DEFAULT_YEAR_MAX,
            min_count: DEFAULT_MIN_COUNT,
        }
    }
}

impl CleanConfig {
    pub fn new(year_min: i64, year_max: i64, min_count: i64) -> Self {
        Self {
            year_min,
            year_max,
            min_count,
        }
    }

    /// Load from YAML string. Fields left out take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(CleanError::from)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(CleanError::from)
    }

    /// Override individual fields, keeping the current value where `None`.
    pub fn with_overrides(
        mut self,
        year_min: Option<i64>,
        year_max: Option<i64>,
        min_count: Option<i64>,
    ) -> Self {
        if let Some(v) = year_min {
            self.year_min = v;
        }
        if let Some(v) = year_max {
            self.year_max = v;
        }
        if let Some(v) = min_count {
            self.min_count = v;
        }
        self
    }
}
