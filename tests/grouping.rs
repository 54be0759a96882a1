//! End-to-end behaviour of the group/value splitter.

use ndarray::{array, Array2};
use tabular_prep::prelude::*;
use tabular_prep::preprocessing::ValueMatrix;
use tabular_prep::table::CsrMatrix;

fn sales() -> DataFrame {
    DataFrame::from_series(vec![
        Series::from_strs("shop", &["north", "south", "north", "east"]),
        Series::from_i64("year", vec![2020, 2020, 2021, 2021]),
        Series::from_f64("units", vec![10.0, 12.0, 8.0, 3.0]),
        Series::from_f64("price", vec![1.5, 1.4, 1.6, 2.0]),
    ])
    .unwrap()
    .with_index(vec![40, 41, 42, 43])
    .unwrap()
}

#[test]
fn labeled_split_shapes_and_index() {
    let df = sales();
    let split = GroupValueSplitter::new("GroupedPredictor")
        .split(&df, &GroupColumns::from(vec!["shop", "year"]))
        .unwrap();

    assert_eq!(split.groups.n_rows(), df.n_rows());
    assert_eq!(split.groups.index(), &[0, 1, 2, 3]);
    assert_eq!(split.values.ncols(), df.n_columns() - 2);
    assert_eq!(
        split.values.as_numeric().unwrap(),
        &array![[10.0, 1.5], [12.0, 1.4], [8.0, 1.6], [3.0, 2.0]]
    );
}

#[test]
fn positional_split_shapes() {
    let cells = Array2::from_shape_vec(
        (2, 3),
        vec![
            Value::Int(1),
            Value::Float(0.5),
            Value::from("x"),
            Value::Int(2),
            Value::Float(0.7),
            Value::from("y"),
        ],
    )
    .unwrap();
    let split = GroupValueSplitter::new("GroupedPredictor")
        .split(&cells, &GroupColumns::from(vec![0usize, 2]))
        .unwrap();

    assert_eq!(split.groups.column_names(), vec!["0", "1"]);
    assert_eq!(split.groups.index(), &[0, 1]);
    assert_eq!(split.values.ncols(), 3 - 2);
    assert_eq!(split.values.as_numeric().unwrap(), &array![[0.5], [0.7]]);
}

#[test]
fn complex_data_rejected_for_any_groups() {
    let df = DataFrame::from_series(vec![
        Series::from_strs("shop", &["a", "b"]),
        Series::from_complex("signal", vec![(1.0, 0.5), (0.0, 1.0)]),
    ])
    .unwrap();
    for groups in [
        GroupColumns::from("shop"),
        GroupColumns::from("signal"),
        GroupColumns::from("nope"),
        GroupColumns::from(vec![0usize]),
    ] {
        let err = GroupValueSplitter::new("g").split(&df, &groups).unwrap_err();
        assert!(matches!(err, PreprocessingError::DataFormat(_)), "{groups}");
    }
}

#[test]
fn missing_string_key_rejected_even_with_complete_numeric_keys() {
    let df = DataFrame::from_series(vec![
        Series::from_opt_strs("shop", &[Some("north"), None, Some("east")]),
        Series::from_i64("year", vec![2020, 2021, 2022]),
        Series::from_f64("units", vec![1.0, 2.0, 3.0]),
    ])
    .unwrap();
    let lenient = GroupValueSplitter::new("g")
        .with_options(ValidationOptions::default().allow_nan(true));
    let err = lenient
        .split(&df, &GroupColumns::from(vec!["shop", "year"]))
        .unwrap_err();
    assert!(matches!(err, PreprocessingError::Validation(_)));
}

#[test]
fn sparse_input_rejected() {
    let sparse = CsrMatrix::from_triplets((3, 3), &[(0, 1, 2.0)]).unwrap();
    let err = GroupValueSplitter::new("GroupedPredictor")
        .split(&sparse, &GroupColumns::from(vec![0usize]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Data format error: The estimator GroupedPredictor does not work on sparse matrices"
    );
}

#[test]
fn unvalidated_values_keep_cells() {
    let df = DataFrame::from_series(vec![
        Series::from_strs("shop", &["a", "b"]),
        Series::from_strs("note", &["x", "y"]),
    ])
    .unwrap();
    let groups = GroupColumns::from("shop");

    let err = GroupValueSplitter::new("g").split(&df, &groups).unwrap_err();
    assert!(matches!(err, PreprocessingError::Validation(_)));

    let split = GroupValueSplitter::new("g")
        .with_value_validation(false)
        .split(&df, &groups)
        .unwrap();
    let (groups, values) = split.into_parts();
    assert_eq!(groups.column_names(), vec!["shop"]);
    match values {
        ValueMatrix::Mixed(cells) => assert_eq!(cells[[1, 0]], Value::from("y")),
        other => panic!("unexpected matrix: {other:?}"),
    }
}

#[test]
fn options_loaded_from_json_drive_validation() {
    let options = ValidationOptions::from_json(r#"{"allow_nan": true}"#).unwrap();
    let df = DataFrame::from_series(vec![
        Series::from_strs("shop", &["a", "b"]),
        Series::from_f64("units", vec![f64::NAN, 1.0]),
    ])
    .unwrap();
    let split = GroupValueSplitter::new("g")
        .with_options(options)
        .split(&df, &GroupColumns::from("shop"))
        .unwrap();
    assert!(split.values.as_numeric().unwrap()[[0, 0]].is_nan());
}
