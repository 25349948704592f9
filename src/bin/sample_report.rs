use std::sync::Arc;

use anyhow::{Context as _, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusty_eda::data::model::{Column, Table};
use rusty_eda::display::{Composite, Context, DisplayItem};
use rusty_eda::inspect;
use rusty_eda::summary::{profile_columns, summarize_categorical, summarize_numeric};

/// Normal draw via Box-Muller.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random_range(f64::EPSILON..1.0);
    let u2: f64 = rng.random();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Measurements of three samples at five concentrations by two operators,
/// with a few dropped readings and one repeated record.
fn sample_table() -> Result<Table> {
    let mut rng = StdRng::seed_from_u64(42);

    let samples = ["Sample_A", "Sample_B", "Sample_C"];
    let concentrations = [0.1, 0.5, 1.0, 2.0, 5.0];
    let operators = ["Alice", "Bob"];

    let mut ids = Vec::new();
    let mut sample_col = Vec::new();
    let mut operator_col = Vec::new();
    let mut conc_col = Vec::new();
    let mut absorbance = Vec::new();
    let mut passed = Vec::new();

    let mut row_id: i64 = 0;
    for sample in samples {
        for conc in concentrations {
            for operator in operators {
                let reading = gauss(&mut rng, 0.8 * conc, 0.05 * conc);
                // roughly one reading in twelve is lost
                let dropped = rng.random_bool(0.08);

                ids.push(Some(row_id));
                sample_col.push(Some(sample));
                operator_col.push(Some(operator));
                conc_col.push(Some(conc));
                absorbance.push((!dropped).then_some(reading));
                passed.push((!dropped).then_some(reading > 0.5));
                row_id += 1;
            }
        }
    }

    // Repeat the last record verbatim so the duplicate check has something to find.
    let last = ids.len() - 1;
    ids.push(ids[last]);
    sample_col.push(sample_col[last]);
    operator_col.push(operator_col[last]);
    conc_col.push(conc_col[last]);
    absorbance.push(absorbance[last]);
    passed.push(passed[last]);

    Ok(Table::new(vec![
        Column::integer("measurement_id", ids),
        Column::text("sample", sample_col),
        Column::text("operator", operator_col),
        Column::floating("concentration", conc_col),
        Column::floating("absorbance", absorbance),
        Column::boolean("passed", passed),
    ])?)
}

fn main() -> Result<()> {
    env_logger::init();

    let table = sample_table().context("building sample table")?;
    log::info!(
        "built sample table with {} rows and columns {:?}",
        table.row_count(),
        table.column_names()
    );

    inspect(&table).context("inspecting table")?;

    let profile = profile_columns(&table);
    let numeric = summarize_numeric(&table);
    let categorical = summarize_categorical(&table);

    println!("\n=== COLUMN PROFILE ===");
    println!("{}", profile.to_pretty_string()?);
    println!("\n=== NUMERIC SUMMARY ===");
    println!("{}", numeric.to_pretty_string()?);
    println!("\n=== CATEGORICAL SUMMARY ===");
    println!("{}", categorical.to_pretty_string()?);

    let context = Context::new()
        .with("profile", Arc::new(profile))
        .with("categorical", Arc::new(categorical));
    let composite = Composite::resolve(
        [DisplayItem::from("profile"), DisplayItem::from("categorical")],
        &context,
    )
    .context("resolving display items")?;

    println!("\n=== SIDE BY SIDE (plain) ===");
    println!("{composite}");
    log::debug!("rich rendering is {} bytes", composite.to_html().len());

    Ok(())
}
