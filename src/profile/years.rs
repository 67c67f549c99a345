//! Year coverage profiling for cleaned tables.

use crate::data::YearlyTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Profile of row counts and year coverage in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of rows.
    pub n_rows: usize,
    /// Number of distinct tags.
    pub n_tags: usize,
    /// Distinct years, ascending.
    pub years: Vec<i64>,
    /// Rows per year, keyed by year.
    pub rows_per_year: BTreeMap<i64, usize>,
}

impl TableProfile {
    /// The first `n` distinct years in ascending order.
    pub fn year_sample(&self, n: usize) -> &[i64] {
        &self.years[..n.min(self.years.len())]
    }

    /// Smallest and largest year present.
    pub fn year_span(&self) -> Option<(i64, i64)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

impl std::fmt::Display for TableProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Table Profile")?;
        writeln!(f, "  Rows:  {}", self.n_rows)?;
        writeln!(f, "  Tags:  {}", self.n_tags)?;
        match self.year_span() {
            Some((lo, hi)) => writeln!(f, "  Years: {} ({} - {})", self.years.len(), lo, hi)?,
            None => writeln!(f, "  Years: 0")?,
        }
        for (year, n) in &self.rows_per_year {
            writeln!(f, "    {}: {} rows", year, n)?;
        }
        Ok(())
    }
}

/// Profile a table's size and year coverage.
pub fn profile_table(table: &YearlyTable) -> TableProfile {
    let mut rows_per_year: BTreeMap<i64, usize> = BTreeMap::new();
    let mut tags: HashSet<&str> = HashSet::new();
    for row in table.iter() {
        *rows_per_year.entry(row.year).or_default() += 1;
        tags.insert(row.tag.as_str());
    }

    TableProfile {
        n_rows: table.len(),
        n_tags: tags.len(),
        years: rows_per_year.keys().copied().collect(),
        rows_per_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearlyTagRow;

    fn create_test_table() -> YearlyTable {
        YearlyTable::new(vec![
            YearlyTagRow::new(2019, "rust", 10),
            YearlyTagRow::new(2009, "java", 10),
            YearlyTagRow::new(2012, "rust", 10),
            YearlyTagRow::new(2019, "go", 10),
            YearlyTagRow::new(2010, "c", 10),
            YearlyTagRow::new(2021, "java", 10),
            YearlyTagRow::new(2008, "perl", 10),
        ])
    }

    #[test]
    fn test_years_sorted_and_distinct() {
        let profile = profile_table(&create_test_table());
        assert_eq!(profile.n_rows, 7);
        assert_eq!(profile.n_tags, 5);
        assert_eq!(profile.years, vec![2008, 2009, 2010, 2012, 2019, 2021]);
        assert_eq!(profile.rows_per_year[&2019], 2);
    }

    #[test]
    fn test_year_sample() {
        let profile = profile_table(&create_test_table());
        assert_eq!(profile.year_sample(5), &[2008, 2009, 2010, 2012, 2019]);
        assert_eq!(profile.year_sample(100).len(), 6);
        assert_eq!(profile.year_span(), Some((2008, 2021)));
    }

    #[test]
    fn test_empty_profile() {
        let profile = profile_table(&YearlyTable::default());
        assert_eq!(profile.n_rows, 0);
        assert!(profile.year_sample(5).is_empty());
        assert_eq!(profile.year_span(), None);
        assert!(profile.to_string().contains("Years: 0"));
    }
}
