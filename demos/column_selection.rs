//! Column selection example: select, drop and filter by dtype
//!
//! Builds a small table of people, then
//! - keeps a subset of columns with `ColumnSelector`
//! - removes columns with `ColumnDropper`
//! - keeps columns by dtype with `TypeSelector`
//! - stores a fitted selector as bytes and restores it
//!
//! Run with: RUST_LOG=debug cargo run --example column_selection

use std::error::Error;
use tabular_prep::preprocessing::{ColumnSelectorParams, FittedColumnSelector};
use tabular_prep::prelude::*;
use tabular_prep::serialization::SerializableParams;
use tracing_subscriber::EnvFilter;

fn print_frame(title: &str, df: &DataFrame) {
    println!("{title}");
    println!("  columns: {:?}", df.column_names());
    for row in 0..df.n_rows() {
        let cells: Vec<String> = df
            .columns()
            .iter()
            .map(|s| s.get(row).map(ToString::to_string).unwrap_or_default())
            .collect();
        println!("  {:>2} | {}", df.index()[row], cells.join(" | "));
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Column Selection ===\n");

    let df = DataFrame::from_series(vec![
        Series::from_strs("name", &["Swen", "Victor", "Alex"]),
        Series::from_f64("length", vec![1.82, 1.85, 1.80]),
        Series::from_i64("shoesize", vec![42, 44, 45]),
    ])?;
    print_frame("Input:", &df);

    // 1. Drop the name column
    let dropper = ColumnDropper::new("name").fit(&df)?;
    print_frame("ColumnDropper([\"name\"]):", &dropper.transform(&df)?);

    // 2. Select in a custom order
    let selector = ColumnSelector::new(["shoesize", "length"]).fit(&df)?;
    print_frame("ColumnSelector([\"shoesize\", \"length\"]):", &selector.transform(&df)?);

    // 3. Unknown columns are reported by name
    if let Err(err) = ColumnSelector::new(["weight", "age"]).fit(&df) {
        println!("ColumnSelector([\"weight\", \"age\"]) failed: {err}\n");
    }

    // 4. Numeric columns only
    let numeric = TypeSelector::new().include(DTypeSpec::Number).fit(&df)?;
    println!("TypeSelector(include=number) fitted dtypes:");
    for (name, dtype) in numeric.dtypes() {
        println!("  {name}: {dtype}");
    }
    print_frame("", &numeric.transform(&df)?);

    // 5. A later table whose dtypes drifted
    let drifted = DataFrame::from_series(vec![
        Series::from_strs("name", &["Kim"]),
        Series::from_f64("length", vec![1.70]),
        Series::from_f64("shoesize", vec![39.5]),
    ])?;
    if let Err(err) = numeric.transform(&drifted) {
        println!("TypeSelector on drifted table failed: {err}\n");
    }

    // 6. Persist and restore the fitted selector
    let bytes = selector.extract_params().to_bytes()?;
    println!("Fitted selector params: {} bytes", bytes.len());
    let restored = FittedColumnSelector::from_params(ColumnSelectorParams::from_bytes(&bytes)?)?;
    print_frame("Restored selector on input:", &restored.transform(&df)?);

    Ok(())
}
