//! End-to-end behaviour of the selection transformers.

use tabular_prep::prelude::*;

fn people() -> DataFrame {
    DataFrame::from_series(vec![
        Series::from_strs("name", &["Swen", "Victor", "Alex"]),
        Series::from_f64("length", vec![1.82, 1.85, 1.80]),
        Series::from_i64("shoesize", vec![42, 44, 45]),
    ])
    .unwrap()
}

#[test]
fn dropper_removes_name_and_keeps_values() {
    let df = people();
    let out = ColumnDropper::new(["name"]).fit(&df).unwrap().transform(&df).unwrap();

    assert_eq!(out.column_names(), vec!["length", "shoesize"]);
    assert_eq!(out.column("length"), df.column("length"));
    assert_eq!(out.column("shoesize"), df.column("shoesize"));
}

#[test]
fn selector_reports_missing_weight() {
    let err = ColumnSelector::new(["weight"]).fit(&people()).unwrap_err();
    match err {
        PreprocessingError::ColumnMissing { missing } => {
            assert_eq!(missing, vec!["weight".to_string()])
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fitted_selector_is_reused_across_tables() {
    let fitted = ColumnSelector::new(["shoesize", "name"]).fit(&people()).unwrap();

    let later = DataFrame::from_series(vec![
        Series::from_strs("name", &["Kim"]),
        Series::from_f64("length", vec![1.70]),
        Series::from_i64("shoesize", vec![39]),
    ])
    .unwrap();

    for table in [people(), later] {
        let out = fitted.transform(&table).unwrap();
        assert_eq!(out.column_names(), vec!["shoesize", "name"]);
        assert_eq!(out.n_rows(), table.n_rows());
    }
}

#[test]
fn selectors_chain_like_a_pipeline() {
    let df = people();
    let dropped = ColumnDropper::new("name").fit_transform(&df).unwrap();
    let numeric = TypeSelector::new()
        .include(DType::Float64)
        .fit_transform(&dropped)
        .unwrap();
    assert_eq!(numeric.column_names(), vec!["length"]);
}

#[test]
fn fitted_transformers_are_shareable_across_threads() {
    let fitted = ColumnDropper::new("name").fit(&people()).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| fitted.transform(&people()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().column_names(), vec!["length", "shoesize"]);
        }
    });
}

#[test]
fn type_selector_rejects_drift_in_excluded_column() {
    let fitted = TypeSelector::new()
        .exclude(DTypeSpec::Object)
        .fit(&people())
        .unwrap();

    let drifted = DataFrame::from_series(vec![
        Series::from_strs("name", &["Swen", "Victor", "Alex"]),
        Series::from_f64("length", vec![1.82, 1.85, 1.80]),
        Series::from_f64("shoesize", vec![42.0, 44.0, 45.0]),
    ])
    .unwrap();
    let err = fitted.transform(&drifted).unwrap_err();
    assert!(matches!(err, PreprocessingError::DTypeMismatch(_)));

    let drifted_name = DataFrame::from_series(vec![
        Series::categorical("name", &["Swen", "Victor", "Alex"]),
        Series::from_f64("length", vec![1.82, 1.85, 1.80]),
        Series::from_i64("shoesize", vec![42, 44, 45]),
    ])
    .unwrap();
    assert!(fitted.transform(&drifted_name).is_err());
}
