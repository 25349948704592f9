//! End-to-end checks of the profiler and summarizers on small tables.

use proptest::prelude::*;
use rusty_eda::summary::{
    profile_columns, summarize_categorical, summarize_numeric, Category,
};
use rusty_eda::{Column, SemanticType, Table, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `id` 0..9 unique ints, `category` A/B, `score` floats with one gap.
fn scenario_table() -> Table {
    let categories = ["A", "B", "A", "A", "B", "A", "B", "A", "A", "B"];
    let scores = [
        Some(1.5),
        Some(2.0),
        None,
        Some(3.25),
        Some(2.0),
        Some(4.0),
        Some(0.5),
        Some(1.0),
        Some(2.75),
        Some(3.0),
    ];
    Table::new(vec![
        Column::integer("id", (0..10).map(Some)),
        Column::text("category", categories.map(Some)),
        Column::floating("score", scores),
    ])
    .unwrap()
}

#[test]
fn scenario_profile() {
    init_logging();
    let profile = profile_columns(&scenario_table());

    assert_eq!(profile.column_names(), vec!["id", "category", "score"]);

    let id = profile.get("id").unwrap();
    assert_eq!(id.category, Category::NumericIndex);
    assert_eq!(id.cardinality, 10);
    assert_eq!(id.cardinality_percent, Some(100.0));

    let category = profile.get("category").unwrap();
    assert_eq!(category.category, Category::Binary);
    assert_eq!(category.cardinality, 2);
    assert_eq!(category.dtype, SemanticType::Text);

    let score = profile.get("score").unwrap();
    assert_eq!(score.category, Category::ContinuousNumeric);
    assert_eq!(score.missing, 1);
    assert_eq!(score.missing_percent, Some(10.0));
}

#[test]
fn scenario_numeric_and_categorical() {
    init_logging();
    let table = scenario_table();

    let numeric = summarize_numeric(&table);
    assert_eq!(numeric.column_names(), vec!["id", "score"]);
    let score = numeric.get("score").unwrap();
    assert_eq!(score.count, 9);
    assert_eq!(score.missing, 1);
    assert_eq!(score.missing_percent, Some(10.0));
    assert_eq!(score.mode, Some(2.0));
    assert_eq!(score.min, Some(0.5));
    assert_eq!(score.max, Some(4.0));

    let categorical = summarize_categorical(&table);
    assert_eq!(categorical.column_names(), vec!["category"]);
    let category = categorical.get("category").unwrap();
    assert_eq!(category.count, 10);
    assert_eq!(category.unique, 2);
    assert_eq!(category.top, Some(Value::Text("A".into())));
    assert_eq!(category.freq, Some(6));
    assert_eq!(category.missing_percent, Some(0.0));
}

#[test]
fn zero_row_table_has_null_percentages() {
    init_logging();
    let table = Table::new(vec![
        Column::integer("n", Vec::<Option<i64>>::new()),
        Column::text("s", Vec::<Option<String>>::new()),
    ])
    .unwrap();

    for row in &profile_columns(&table) {
        assert_eq!(row.cardinality_percent, None);
        assert_eq!(row.missing_percent, None);
    }
    assert_eq!(profile_columns(&table).get("n").unwrap().category, Category::DiscreteNumeric);

    let numeric = summarize_numeric(&table);
    let n = numeric.get("n").unwrap();
    assert_eq!(n.missing_percent, None);
    assert_eq!(n.mean, None);

    let categorical = summarize_categorical(&table);
    let s = categorical.get("s").unwrap();
    assert_eq!(s.missing_percent, None);
    assert_eq!(s.top, None);
}

#[test]
fn summaries_export_as_json_and_csv() {
    let table = scenario_table();

    let json: serde_json::Value =
        serde_json::from_str(&summarize_numeric(&table).to_json().unwrap()).unwrap();
    assert_eq!(json[1]["column"], "score");
    assert_eq!(json[1]["count"], 9);
    assert_eq!(json[0]["25%"], 2.25);

    let csv = summarize_categorical(&table).to_csv_string().unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("column,count,unique,top,freq,missing,missing_percent")
    );
    assert_eq!(lines.next(), Some("category,10,2,A,6,0,0.0"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_table() -> impl Strategy<Value = Table> {
    (1usize..30).prop_flat_map(|rows| {
        (
            prop::collection::vec(prop::option::weighted(0.8, -50i64..50), rows),
            prop::collection::vec(prop::option::weighted(0.8, -1e3f64..1e3), rows),
            prop::collection::vec(prop::option::weighted(0.8, "[a-c]"), rows),
        )
            .prop_map(|(ints, floats, texts)| {
                Table::new(vec![
                    Column::integer("ints", ints),
                    Column::floating("floats", floats),
                    Column::text("texts", texts),
                ])
                .unwrap()
            })
    })
}

proptest! {
    #[test]
    fn profile_has_one_row_per_column_in_order(table in arb_table()) {
        let profile = profile_columns(&table);
        prop_assert_eq!(profile.column_names(), table.column_names());
    }

    #[test]
    fn numeric_missing_counts_match_profile(table in arb_table()) {
        let profile = profile_columns(&table);
        let numeric = summarize_numeric(&table);
        for row in &numeric {
            let p = profile.get(&row.column).unwrap();
            prop_assert_eq!(row.missing, p.missing);
            prop_assert_eq!(row.missing_percent, p.missing_percent);
        }
    }

    #[test]
    fn iqr_and_range_are_exact_differences(table in arb_table()) {
        for row in &summarize_numeric(&table) {
            match (row.q75, row.q25) {
                (Some(q75), Some(q25)) => prop_assert_eq!(row.iqr, Some(q75 - q25)),
                _ => prop_assert_eq!(row.iqr, None),
            }
            match (row.max, row.min) {
                (Some(max), Some(min)) => prop_assert_eq!(row.range, Some(max - min)),
                _ => prop_assert_eq!(row.range, None),
            }
        }
    }

    #[test]
    fn summaries_are_idempotent(table in arb_table()) {
        prop_assert_eq!(profile_columns(&table), profile_columns(&table));
        prop_assert_eq!(summarize_numeric(&table), summarize_numeric(&table));
        prop_assert_eq!(summarize_categorical(&table), summarize_categorical(&table));
    }

    #[test]
    fn distinct_integers_are_an_index(rows in 1i64..40) {
        let table = Table::new(vec![Column::integer("id", (0..rows).map(Some))]).unwrap();
        prop_assert_eq!(profile_columns(&table).rows()[0].category, Category::NumericIndex);
    }

    #[test]
    fn two_valued_text_is_binary(flags in prop::collection::vec(any::<bool>(), 2..30)) {
        prop_assume!(flags.iter().any(|&f| f) && flags.iter().any(|&f| !f));
        let values = flags.iter().map(|&f| Some(if f { "yes" } else { "no" }));
        let table = Table::new(vec![Column::text("answer", values)]).unwrap();
        prop_assert_eq!(profile_columns(&table).rows()[0].category, Category::Binary);
    }
}
