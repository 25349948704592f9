use std::collections::HashMap;

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::{count_col, f64_col, percent_of, utf8_col, Summary, SummaryRow};
use crate::data::model::{Column, Table, Value};
use crate::error::Result;

/// Frequency statistics for one non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalRow {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first in row order.
    pub top: Option<Value>,
    pub freq: Option<usize>,
    pub missing: usize,
    pub missing_percent: Option<f64>,
}

pub type CategoricalSummary = Summary<CategoricalRow>;

/// Most frequent present value and its count, ties broken by first appearance.
fn most_frequent(col: &Column) -> Option<(&Value, usize)> {
    // value → (first row seen, occurrences)
    let mut counts: HashMap<&Value, (usize, usize)> = HashMap::new();
    for (idx, value) in col.present().enumerate() {
        counts.entry(value).or_insert((idx, 0)).1 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (first_a, n_a)), (_, (first_b, n_b))| {
            n_a.cmp(n_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (_, n))| (value, n))
}

impl CategoricalRow {
    pub fn from_column(col: &Column, row_count: usize) -> Self {
        let count = col.present().count();
        let missing = col.null_count();
        let top = most_frequent(col);

        CategoricalRow {
            column: col.name().to_string(),
            count,
            unique: col.cardinality(),
            top: top.map(|(v, _)| v.clone()),
            freq: top.map(|(_, n)| n),
            missing,
            missing_percent: percent_of(missing, row_count),
        }
    }
}

impl SummaryRow for CategoricalRow {
    fn column(&self) -> &str {
        &self.column
    }

    fn record_batch(rows: &[Self]) -> Result<RecordBatch> {
        Ok(RecordBatch::try_from_iter(vec![
            ("column", utf8_col(rows, |r| Some(r.column.clone()))),
            ("count", count_col(rows, |r| Some(r.count))),
            ("unique", count_col(rows, |r| Some(r.unique))),
            ("top", utf8_col(rows, |r| r.top.as_ref().map(Value::to_string))),
            ("freq", count_col(rows, |r| r.freq)),
            ("missing", count_col(rows, |r| Some(r.missing))),
            ("missing_percent", f64_col(rows, |r| r.missing_percent)),
        ])?)
    }
}

/// Summarize every column that is not integer or floating.
pub fn summarize_categorical(table: &Table) -> CategoricalSummary {
    let rows = table.row_count();
    let summary: Vec<CategoricalRow> = table
        .columns()
        .iter()
        .filter(|c| !c.dtype().is_numeric())
        .map(|c| CategoricalRow::from_column(c, rows))
        .collect();
    log::debug!("summarized {} categorical columns", summary.len());
    Summary::new(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_top_value_and_frequency() {
        let col = Column::text(
            "c",
            [Some("b"), Some("a"), None, Some("a"), Some("c"), Some("a")],
        );
        let row = CategoricalRow::from_column(&col, 6);
        assert_eq!(row.count, 5);
        assert_eq!(row.unique, 3);
        assert_eq!(row.top, Some(Value::Text("a".into())));
        assert_eq!(row.freq, Some(3));
        assert_eq!(row.missing, 1);
    }

    #[test]
    fn ties_go_to_first_seen_value() {
        let col = Column::text("c", [Some("y"), Some("x"), Some("x"), Some("y")]);
        let row = CategoricalRow::from_column(&col, 4);
        assert_eq!(row.top, Some(Value::Text("y".into())));
        assert_eq!(row.freq, Some(2));
    }

    #[test]
    fn all_missing_column_has_no_top() {
        let col = Column::text("c", [None::<&str>, None]);
        let row = CategoricalRow::from_column(&col, 2);
        assert_eq!(row.count, 0);
        assert_eq!(row.unique, 0);
        assert_eq!(row.top, None);
        assert_eq!(row.freq, None);
        assert_eq!(row.missing_percent, Some(100.0));
    }

    #[test]
    fn booleans_are_summarized_as_categories() {
        let table = Table::new(vec![
            Column::boolean("flag", [Some(true), Some(false), Some(false)]),
            Column::integer("n", [Some(1), Some(2), Some(3)]),
        ])
        .unwrap();
        let summary = summarize_categorical(&table);
        assert_eq!(summary.column_names(), vec!["flag"]);
        let flag = summary.get("flag").unwrap();
        assert_eq!(flag.top, Some(Value::Bool(false)));
        assert_eq!(flag.freq, Some(2));
    }

    #[test]
    fn pretty_output_shows_nulls() {
        let table = Table::new(vec![Column::text("empty", [None::<&str>])]).unwrap();
        let text = summarize_categorical(&table).to_pretty_string().unwrap();
        assert!(text.contains("empty"));
        assert!(text.contains("null"));
    }
}
