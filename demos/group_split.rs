//! Group/value splitting example
//!
//! Splits a sales table into grouping keys and a numeric value matrix, the
//! way a per-group estimator would before fitting one model per shop.
//!
//! Run with: RUST_LOG=tabular_prep=trace cargo run --example group_split

use ndarray::Array2;
use std::error::Error;
use tabular_prep::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Group / Value Split ===\n");

    let sales = DataFrame::from_series(vec![
        Series::from_strs("shop", &["north", "south", "north", "east"]),
        Series::from_i64("year", vec![2020, 2020, 2021, 2021]),
        Series::from_f64("units", vec![10.0, 12.0, 8.0, 3.0]),
        Series::from_f64("price", vec![1.5, 1.4, 1.6, 2.0]),
    ])?
    .with_index(vec![40, 41, 42, 43])?;

    let splitter = GroupValueSplitter::new("GroupedPredictor");

    // 1. Labeled input
    let split = splitter.split(&sales, &GroupColumns::from(vec!["shop", "year"]))?;
    println!("Group columns: {:?}", split.groups.column_names());
    println!("Group index (reset): {:?}", split.groups.index());
    println!("Values:\n{}\n", split.values.into_numeric()?);

    // 2. Positional input with a negative position
    let cells = Array2::from_shape_vec(
        (3, 3),
        vec![
            Value::Float(0.1),
            Value::Float(5.0),
            Value::from("a"),
            Value::Float(0.2),
            Value::Float(6.0),
            Value::from("b"),
            Value::Float(0.3),
            Value::Float(7.0),
            Value::from("a"),
        ],
    )?;
    let split = splitter.split(&cells, &GroupColumns::positions([-1]))?;
    println!("Positional group columns: {:?}", split.groups.column_names());
    println!("Values:\n{}\n", split.values.into_numeric()?);

    // 3. Missing group keys are rejected
    let gappy = DataFrame::from_series(vec![
        Series::from_opt_strs("shop", &[Some("north"), None]),
        Series::from_f64("units", vec![1.0, 2.0]),
    ])?;
    if let Err(err) = splitter.split(&gappy, &GroupColumns::from("shop")) {
        println!("Split with missing key failed: {err}");
    }

    // 4. Allow NaN in values through JSON options
    let lenient = splitter
        .clone()
        .with_options(ValidationOptions::from_json(r#"{"allow_nan": true}"#)?);
    let with_nan = DataFrame::from_series(vec![
        Series::from_strs("shop", &["north", "south"]),
        Series::from_f64("units", vec![f64::NAN, 2.0]),
    ])?;
    let split = lenient.split(&with_nan, &GroupColumns::from("shop"))?;
    println!("Lenient split values: {:?}", split.values.shape());

    Ok(())
}
