use std::collections::HashSet;

use super::model::Table;

// ---------------------------------------------------------------------------
// Row selection helpers
// ---------------------------------------------------------------------------

/// Mark each row that repeats an earlier row across every column.
///
/// The first occurrence of a row is never marked. Missing cells compare
/// equal to each other, so two all-null rows are duplicates.
pub fn duplicated(table: &Table) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(table.row_count());
    (0..table.row_count())
        .map(|idx| {
            // row() is always Some for idx < row_count
            let key = table.row(idx).unwrap_or_default();
            !seen.insert(key)
        })
        .collect()
}

/// Number of duplicated rows (total rows minus distinct rows).
pub fn duplicate_count(table: &Table) -> usize {
    duplicated(table).into_iter().filter(|&d| d).count()
}

/// Indices of the first `n` rows.
pub fn head_indices(table: &Table, n: usize) -> Vec<usize> {
    (0..n.min(table.row_count())).collect()
}

/// Indices of the last `n` rows, in ascending order.
pub fn tail_indices(table: &Table, n: usize) -> Vec<usize> {
    let rows = table.row_count();
    (rows.saturating_sub(n)..rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, SemanticType, Value};

    fn sample() -> Table {
        Table::new(vec![
            Column::integer("a", [Some(1), Some(1), Some(2), None, None]),
            Column::text("b", [Some("x"), Some("x"), Some("x"), None, None]),
        ])
        .unwrap()
    }

    #[test]
    fn duplicates_skip_first_occurrence() {
        assert_eq!(duplicated(&sample()), vec![false, true, false, false, true]);
        assert_eq!(duplicate_count(&sample()), 2);
    }

    #[test]
    fn nan_and_null_rows_collide() {
        let t = Table::new(vec![Column::floating("f", [Some(f64::NAN), None])]).unwrap();
        assert_eq!(duplicate_count(&t), 1);
    }

    #[test]
    fn raw_nan_cell_duplicates_a_null_row() {
        let f = Column::new(
            "f",
            SemanticType::Floating,
            vec![Value::Float(f64::NAN), Value::Null, Value::Float(1.0)],
        )
        .unwrap();
        let t = Table::new(vec![f]).unwrap();
        assert_eq!(duplicated(&t), vec![false, true, false]);
        assert_eq!(t.columns()[0].cardinality(), 1);
    }

    #[test]
    fn head_and_tail_clamp_to_row_count() {
        let t = sample();
        assert_eq!(head_indices(&t, 3), vec![0, 1, 2]);
        assert_eq!(head_indices(&t, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(tail_indices(&t, 2), vec![3, 4]);
        assert_eq!(tail_indices(&t, 10), vec![0, 1, 2, 3, 4]);
        assert!(tail_indices(&Table::default(), 10).is_empty());
    }
}
