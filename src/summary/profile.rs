use std::fmt;

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::{count_col, f64_col, percent_of, utf8_col, Summary, SummaryRow};
use crate::data::model::{SemanticType, Table};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Category – inferred semantic role of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Nominal Categorical")]
    NominalCategorical,
    Binary,
    #[serde(rename = "Numeric Index")]
    NumericIndex,
    #[serde(rename = "Continuous Numeric")]
    ContinuousNumeric,
    #[serde(rename = "Discrete Numeric")]
    DiscreteNumeric,
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::NominalCategorical => "Nominal Categorical",
            Category::Binary => "Binary",
            Category::NumericIndex => "Numeric Index",
            Category::ContinuousNumeric => "Continuous Numeric",
            Category::DiscreteNumeric => "Discrete Numeric",
            Category::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Infer a column's category from its type tag and cardinality.
///
/// * text: `Binary` when exactly two distinct values, else `NominalCategorical`
/// * integer/floating: `NumericIndex` when every row holds a distinct value,
///   else `ContinuousNumeric` for floats and `DiscreteNumeric` for integers
/// * anything else: `Unknown`
///
/// A zero-row table never yields `NumericIndex`.
pub fn classify(dtype: SemanticType, cardinality: usize, row_count: usize) -> Category {
    match dtype {
        SemanticType::Text if cardinality == 2 => Category::Binary,
        SemanticType::Text => Category::NominalCategorical,
        SemanticType::Integer | SemanticType::Floating
            if row_count > 0 && cardinality == row_count =>
        {
            Category::NumericIndex
        }
        SemanticType::Floating => Category::ContinuousNumeric,
        SemanticType::Integer => Category::DiscreteNumeric,
        SemanticType::Boolean | SemanticType::Unknown => Category::Unknown,
    }
}

// ---------------------------------------------------------------------------
// ColumnProfile
// ---------------------------------------------------------------------------

/// Profile of one input column. Percentages are `None` for a zero-row table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub column: String,
    pub dtype: SemanticType,
    pub category: Category,
    pub cardinality: usize,
    pub cardinality_percent: Option<f64>,
    pub missing: usize,
    pub missing_percent: Option<f64>,
}

pub type ProfileTable = Summary<ColumnProfile>;

impl SummaryRow for ColumnProfile {
    fn column(&self) -> &str {
        &self.column
    }

    fn record_batch(rows: &[Self]) -> Result<RecordBatch> {
        Ok(RecordBatch::try_from_iter(vec![
            ("column", utf8_col(rows, |r| Some(r.column.clone()))),
            ("dtype", utf8_col(rows, |r| Some(r.dtype.to_string()))),
            ("category", utf8_col(rows, |r| Some(r.category.to_string()))),
            ("cardinality", count_col(rows, |r| Some(r.cardinality))),
            ("cardinality_percent", f64_col(rows, |r| r.cardinality_percent)),
            ("missing", count_col(rows, |r| Some(r.missing))),
            ("missing_percent", f64_col(rows, |r| r.missing_percent)),
        ])?)
    }
}

/// Profile every column of `table`, in column order.
pub fn profile_columns(table: &Table) -> ProfileTable {
    let rows = table.row_count();
    log::debug!("profiling {} columns over {rows} rows", table.column_count());

    let profiles = table
        .columns()
        .iter()
        .map(|col| {
            let cardinality = col.cardinality();
            let missing = col.null_count();
            let category = classify(col.dtype(), cardinality, rows);
            log::trace!("column '{}' classified as {category}", col.name());
            ColumnProfile {
                column: col.name().to_string(),
                dtype: col.dtype(),
                category,
                cardinality,
                cardinality_percent: percent_of(cardinality, rows),
                missing,
                missing_percent: percent_of(missing, rows),
            }
        })
        .collect();

    Summary::new(profiles)
}
