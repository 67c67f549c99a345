//! Fixed column layout of the yearly aggregation table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns in every input and output line.
pub const N_COLUMNS: usize = 9;

/// Value type a column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text, kept verbatim.
    Text,
    /// 64-bit signed integer, null on coercion failure.
    Integer,
    /// 64-bit float, null on coercion failure.
    Float,
}

/// A column of the yearly (year, tag) aggregation table.
///
/// Variants are declared in file order, so `Column::ALL[i].index() == i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Year,
    Tag,
    Count,
    TotalViews,
    TotalScore,
    TotalAnswers,
    AvgViews,
    AvgScore,
    AvgAnswers,
}

impl Column {
    /// All columns in file order.
    pub const ALL: [Column; N_COLUMNS] = [
        Column::Year,
        Column::Tag,
        Column::Count,
        Column::TotalViews,
        Column::TotalScore,
        Column::TotalAnswers,
        Column::AvgViews,
        Column::AvgScore,
        Column::AvgAnswers,
    ];

    /// Columns that must be present for a row to survive.
    pub const REQUIRED: [Column; 3] = [Column::Year, Column::Tag, Column::Count];

    /// Optional numeric columns; a failed coercion nulls the field but keeps the row.
    pub const OPTIONAL_NUMERIC: [Column; 6] = [
        Column::TotalViews,
        Column::TotalScore,
        Column::TotalAnswers,
        Column::AvgViews,
        Column::AvgScore,
        Column::AvgAnswers,
    ];

    /// Header name of the column.
    pub fn name(self) -> &'static str {
        match self {
            Column::Year => "year",
            Column::Tag => "tag",
            Column::Count => "count",
            Column::TotalViews => "total_views",
            Column::TotalScore => "total_score",
            Column::TotalAnswers => "total_answers",
            Column::AvgViews => "avg_views",
            Column::AvgScore => "avg_score",
            Column::AvgAnswers => "avg_answers",
        }
    }

    /// Zero-based position of the column in a line.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Tag => ColumnKind::Text,
            Column::Year
            | Column::Count
            | Column::TotalViews
            | Column::TotalScore
            | Column::TotalAnswers => ColumnKind::Integer,
            Column::AvgViews | Column::AvgScore | Column::AvgAnswers => ColumnKind::Float,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header names in file order.
pub fn header() -> [&'static str; N_COLUMNS] {
    Column::ALL.map(Column::name)
}
