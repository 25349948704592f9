//! First-look diagnostics for a table: shape, memory, types, missing values,
//! duplicate rows, and the first/last rows.

use std::fmt;

use serde::Deserialize;

use crate::data::filter::{duplicate_count, head_indices, tail_indices};
use crate::data::model::{SemanticType, Table};
use crate::error::Result;

/// How many rows the report shows from each end of the table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    pub head_rows: usize,
    pub tail_rows: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            head_rows: 5,
            tail_rows: 10,
        }
    }
}

/// Per-column line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: SemanticType,
    pub non_null: usize,
    pub nulls: usize,
}

/// Everything the inspector prints, gathered up front.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionReport {
    pub rows: usize,
    pub columns: usize,
    pub memory_bytes: usize,
    pub column_info: Vec<ColumnInfo>,
    pub duplicate_rows: usize,
    pub head: Table,
    pub tail: Table,
}

impl InspectionReport {
    pub fn build(table: &Table, options: &InspectOptions) -> Result<Self> {
        let column_info = table
            .columns()
            .iter()
            .map(|c| {
                let nulls = c.null_count();
                ColumnInfo {
                    name: c.name().to_string(),
                    dtype: c.dtype(),
                    non_null: c.len() - nulls,
                    nulls,
                }
            })
            .collect();

        Ok(InspectionReport {
            rows: table.row_count(),
            columns: table.column_count(),
            memory_bytes: table.memory_size()?,
            column_info,
            duplicate_rows: duplicate_count(table),
            head: table.take(&head_indices(table, options.head_rows)),
            tail: table.take(&tail_indices(table, options.tail_rows)),
        })
    }

    pub fn memory_kb(&self) -> f64 {
        self.memory_bytes as f64 / 1024.0
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .column_info
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("Column".len());

        writeln!(f, "=== SIZE AND STRUCTURE ===")?;
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Columns: {}", self.columns)?;
        writeln!(f, "Memory usage: {:.2} KB", self.memory_kb())?;
        writeln!(f)?;

        writeln!(f, "=== COLUMN TYPES ===")?;
        for c in &self.column_info {
            writeln!(f, "{:<width$}  {}", c.name, c.dtype)?;
        }
        writeln!(f)?;
        writeln!(f, "Column details:")?;
        writeln!(f, " #   {:<width$}  Non-Null Count  Dtype", "Column")?;
        for (i, c) in self.column_info.iter().enumerate() {
            writeln!(
                f,
                " {i:<3} {:<width$}  {:>8} non-null  {}",
                c.name, c.non_null, c.dtype
            )?;
        }
        writeln!(f)?;

        writeln!(f, "=== INITIAL ISSUES ===")?;
        writeln!(f, "Duplicate rows: {}", self.duplicate_rows)?;
        writeln!(f)?;
        writeln!(f, "Missing values per column:")?;
        for c in &self.column_info {
            writeln!(f, "{:<width$}  {}", c.name, c.nulls)?;
        }
        writeln!(f)?;

        writeln!(f, "First rows:")?;
        writeln!(f, "{}", self.head.to_pretty_string().map_err(|_| fmt::Error)?)?;
        writeln!(f)?;
        writeln!(f, "Last rows:")?;
        write!(f, "{}", self.tail.to_pretty_string().map_err(|_| fmt::Error)?)
    }
}

/// Print the diagnostic report for `table` to stdout with default options.
pub fn inspect(table: &Table) -> Result<()> {
    inspect_with(table, &InspectOptions::default())
}

pub fn inspect_with(table: &Table, options: &InspectOptions) -> Result<()> {
    let report = InspectionReport::build(table, options)?;
    log::debug!(
        "inspected table: {} rows x {} columns, {} duplicates",
        report.rows,
        report.columns,
        report.duplicate_rows
    );
    println!("{report}");
    Ok(())
}
