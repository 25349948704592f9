//! Per-column summary tables: profile, numeric statistics, categorical
//! statistics.
//!
//! Each summarizer walks the table once and returns a [`Summary`], a list of
//! rows indexed by column name in input column order. Summaries serialize to
//! JSON and CSV and convert to Arrow record batches for pretty printing.

pub mod categorical;
pub mod numeric;
pub mod profile;

use std::io;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::record_batch::RecordBatch;
use arrow::util::display::FormatOptions;
use arrow::util::pretty::pretty_format_batches_with_options;
use serde::Serialize;

use crate::data::interop::NULL_TEXT;
use crate::error::{EdaError, Result};

pub use categorical::{summarize_categorical, CategoricalRow, CategoricalSummary};
pub use numeric::{summarize_numeric, NumericRow, NumericSummary};
pub use profile::{classify, profile_columns, Category, ColumnProfile, ProfileTable};

/// `part / whole × 100`, or `None` for an empty table.
pub fn percent_of(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// SummaryRow / Summary
// ---------------------------------------------------------------------------

/// One row of a summary table.
pub trait SummaryRow: Serialize + Sized {
    /// Name of the input column this row describes.
    fn column(&self) -> &str;

    /// Lay the rows out as an Arrow record batch, one field per statistic.
    fn record_batch(rows: &[Self]) -> Result<RecordBatch>;
}

/// A summary table indexed by input column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Summary<R> {
    rows: Vec<R>,
}

impl<R: SummaryRow> Summary<R> {
    pub(crate) fn new(rows: Vec<R>) -> Self {
        Summary { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look a row up by input column name.
    pub fn get(&self, column: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.column() == column)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.rows.iter().map(SummaryRow::column).collect()
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        R::record_batch(&self.rows)
    }

    /// Render as an ASCII table.
    pub fn to_pretty_string(&self) -> Result<String> {
        let batch = self.to_record_batch()?;
        let options = FormatOptions::default().with_null(NULL_TEXT);
        Ok(pretty_format_batches_with_options(&[batch], &options)?.to_string())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    /// Write the rows as CSV with a header line. Undefined cells are empty.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| EdaError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

impl<'a, R> IntoIterator for &'a Summary<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// -- Arrow column helpers shared by the row types --

pub(crate) fn utf8_col<R>(rows: &[R], f: impl Fn(&R) -> Option<String>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<StringArray>())
}

pub(crate) fn count_col<R>(rows: &[R], f: impl Fn(&R) -> Option<usize>) -> ArrayRef {
    Arc::new(
        rows.iter()
            .map(|r| f(r).map(|n| n as u64))
            .collect::<UInt64Array>(),
    )
}

pub(crate) fn f64_col<R>(rows: &[R], f: impl Fn(&R) -> Option<f64>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<Float64Array>())
}
