use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::{count_col, f64_col, percent_of, utf8_col, Summary, SummaryRow};
use crate::data::model::{Column, Table};
use crate::error::Result;
use crate::stats;

/// Descriptive statistics for one numeric column.
///
/// Everything except `missing`/`missing_percent` is computed over the
/// non-missing values only; the missing percentage is relative to the full
/// row count. A statistic that is undefined for the sample size is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericRow {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub std: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
    pub iqr: Option<f64>,
    pub range: Option<f64>,
    pub variance: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub missing: usize,
    pub missing_percent: Option<f64>,
}

pub type NumericSummary = Summary<NumericRow>;

fn diff(hi: Option<f64>, lo: Option<f64>) -> Option<f64> {
    Some(hi? - lo?)
}

impl NumericRow {
    /// Summarize one column against the table's row count.
    pub fn from_column(col: &Column, row_count: usize) -> Self {
        let data = col.numeric_values();

        let min = stats::min(&data);
        let max = stats::max(&data);
        let q25 = stats::quantile(&data, 0.25);
        let q75 = stats::quantile(&data, 0.75);
        let std = stats::std_dev(&data);
        let missing = col.null_count();

        NumericRow {
            column: col.name().to_string(),
            count: data.len(),
            mean: stats::mean(&data),
            median: stats::median(&data),
            mode: stats::mode(&data),
            std,
            std_dev: std,
            min,
            q25,
            q50: stats::quantile(&data, 0.50),
            q75,
            max,
            iqr: diff(q75, q25),
            range: diff(max, min),
            variance: stats::variance(&data),
            skewness: stats::skewness(&data),
            kurtosis: stats::kurtosis(&data),
            missing,
            missing_percent: percent_of(missing, row_count),
        }
    }
}

impl SummaryRow for NumericRow {
    fn column(&self) -> &str {
        &self.column
    }

    fn record_batch(rows: &[Self]) -> Result<RecordBatch> {
        Ok(RecordBatch::try_from_iter(vec![
            ("column", utf8_col(rows, |r| Some(r.column.clone()))),
            ("count", count_col(rows, |r| Some(r.count))),
            ("mean", f64_col(rows, |r| r.mean)),
            ("median", f64_col(rows, |r| r.median)),
            ("mode", f64_col(rows, |r| r.mode)),
            ("std", f64_col(rows, |r| r.std)),
            ("std_dev", f64_col(rows, |r| r.std_dev)),
            ("min", f64_col(rows, |r| r.min)),
            ("25%", f64_col(rows, |r| r.q25)),
            ("50%", f64_col(rows, |r| r.q50)),
            ("75%", f64_col(rows, |r| r.q75)),
            ("max", f64_col(rows, |r| r.max)),
            ("iqr", f64_col(rows, |r| r.iqr)),
            ("range", f64_col(rows, |r| r.range)),
            ("variance", f64_col(rows, |r| r.variance)),
            ("skewness", f64_col(rows, |r| r.skewness)),
            ("kurtosis", f64_col(rows, |r| r.kurtosis)),
            ("missing", count_col(rows, |r| Some(r.missing))),
            ("missing_percent", f64_col(rows, |r| r.missing_percent)),
        ])?)
    }
}

/// Summarize every integer or floating column; other columns are skipped.
pub fn summarize_numeric(table: &Table) -> NumericSummary {
    let rows = table.row_count();
    let summary: Vec<NumericRow> = table
        .columns()
        .iter()
        .filter(|c| c.dtype().is_numeric())
        .map(|c| NumericRow::from_column(c, rows))
        .collect();
    log::debug!("summarized {} numeric columns", summary.len());
    Summary::new(summary)
}
