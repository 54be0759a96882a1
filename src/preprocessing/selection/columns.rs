//! Name-based column selection.
//!
//! [`ColumnSelector`] keeps the named columns, [`ColumnDropper`] removes them.
//! Both work on any [`Table`] and hand back the same representation they
//! were given.
//!
//! # Example
//! ```
//! use tabular_prep::preprocessing::{ColumnDropper, FittedState, FittedTransformer, Transformer};
//! use tabular_prep::table::{DataFrame, Series, Table};
//!
//! let df = DataFrame::from_series(vec![
//!     Series::from_strs("name", &["Swen", "Victor", "Alex"]),
//!     Series::from_f64("length", vec![1.82, 1.85, 1.80]),
//!     Series::from_i64("shoesize", vec![42, 44, 45]),
//! ])
//! .unwrap();
//!
//! let fitted = ColumnDropper::new("name").fit(&df).unwrap();
//! assert_eq!(fitted.feature_names(), &["length".to_string(), "shoesize".to_string()]);
//!
//! let out = fitted.transform(&df).unwrap();
//! assert_eq!(out.column_names(), vec!["length", "shoesize"]);
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedState, FittedTransformer, Transformer};
use crate::serialization::SerializableParams;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One column name or an ordered list of names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns(Vec<String>);

impl Columns {
    /// Names in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the list of names.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Columns(vec![name.to_string()])
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Columns(vec![name])
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Columns(names)
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Columns(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Columns {
    fn from(names: &[&str]) -> Self {
        Columns(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Columns(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Requested names absent from the table, once each, in request order.
fn missing_columns<T: Table>(data: &T, requested: &[String]) -> Vec<String> {
    let present: HashSet<&str> = data.column_names().into_iter().collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .filter(|name| !present.contains(name.as_str()))
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

fn duplicate_columns(requested: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    requested
        .iter()
        .filter(|name| !seen.insert(name.as_str()))
        .filter(|name| reported.insert(name.as_str()))
        .cloned()
        .collect()
}

fn check_no_duplicates(requested: &[String]) -> Result<(), PreprocessingError> {
    let duplicated = duplicate_columns(requested);
    if duplicated.is_empty() {
        Ok(())
    } else {
        Err(PreprocessingError::InvalidParameter(format!(
            "Columns {duplicated:?} were requested more than once"
        )))
    }
}

fn check_column_names<T: Table>(data: &T, requested: &[String]) -> Result<(), PreprocessingError> {
    let missing = missing_columns(data, requested);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PreprocessingError::ColumnMissing { missing })
    }
}

/// Keeps only the named columns, in the given order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSelector {
    columns: Columns,
}

impl ColumnSelector {
    /// Create a selector for one or more column names.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into(),
        }
    }

    /// Requested column names.
    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }
}

/// Serializable parameters for a fitted [`ColumnSelector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSelectorParams {
    /// Columns kept on transform.
    pub columns: Vec<String>,
    /// Number of columns seen during fit.
    pub n_features_in: usize,
}

impl SerializableParams for ColumnSelectorParams {
    const KIND: &'static str = "column_selector";
}

impl<T: Table> Transformer<T> for ColumnSelector {
    type Output = T;
    type Fitted = FittedColumnSelector;

    fn fit(&self, data: &T) -> Result<Self::Fitted, PreprocessingError> {
        let columns = self.columns.as_slice();
        check_column_names(data, columns)?;
        if columns.is_empty() {
            return Err(PreprocessingError::EmptyResult(
                "Expected columns to be at least of length 1, found length of 0 instead"
                    .to_string(),
            ));
        }
        check_no_duplicates(columns)?;

        debug!(columns = ?columns, "fitted ColumnSelector");
        Ok(FittedColumnSelector {
            columns: columns.to_vec(),
            n_features_in: data.n_columns(),
        })
    }
}

/// Fitted [`ColumnSelector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedColumnSelector {
    columns: Vec<String>,
    n_features_in: usize,
}

impl<T: Table> FittedTransformer<T> for FittedColumnSelector {
    type Output = T;

    /// Project onto the fitted columns. Column existence is not re-checked;
    /// a missing column surfaces as the table's own error.
    fn transform(&self, data: &T) -> Result<T, PreprocessingError> {
        Ok(data.select(&self.columns)?)
    }
}

impl FittedState for FittedColumnSelector {
    type Params = ColumnSelectorParams;

    fn feature_names(&self) -> &[String] {
        &self.columns
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn extract_params(&self) -> Self::Params {
        ColumnSelectorParams {
            columns: self.columns.clone(),
            n_features_in: self.n_features_in,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.columns.is_empty() {
            return Err(PreprocessingError::EmptyResult(
                "ColumnSelector parameters select no columns".to_string(),
            ));
        }
        check_no_duplicates(&params.columns)?;
        Ok(Self {
            columns: params.columns,
            n_features_in: params.n_features_in,
        })
    }
}

/// Removes the named columns, keeping the rest in table order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDropper {
    columns: Columns,
}

impl ColumnDropper {
    /// Create a dropper for one or more column names.
    pub fn new(columns: impl Into<Columns>) -> Self {
        Self {
            columns: columns.into(),
        }
    }

    /// Column names to drop.
    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }
}

/// Serializable parameters for a fitted [`ColumnDropper`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDropperParams {
    /// Columns removed on transform.
    pub columns: Vec<String>,
    /// Columns kept, as seen during fit.
    pub feature_names: Vec<String>,
    /// Number of columns seen during fit.
    pub n_features_in: usize,
}

impl SerializableParams for ColumnDropperParams {
    const KIND: &'static str = "column_dropper";
}

impl<T: Table> Transformer<T> for ColumnDropper {
    type Output = T;
    type Fitted = FittedColumnDropper;

    fn fit(&self, data: &T) -> Result<Self::Fitted, PreprocessingError> {
        let columns = self.columns.as_slice();
        check_column_names(data, columns)?;

        let feature_names: Vec<String> = data
            .column_names()
            .into_iter()
            .filter(|name| !columns.iter().any(|c| c == name))
            .map(str::to_string)
            .collect();
        if feature_names.is_empty() {
            return Err(PreprocessingError::EmptyResult(format!(
                "Dropping {columns:?} would result in an empty output DataFrame"
            )));
        }

        debug!(dropped = ?columns, kept = feature_names.len(), "fitted ColumnDropper");
        Ok(FittedColumnDropper {
            columns: columns.to_vec(),
            feature_names,
            n_features_in: data.n_columns(),
        })
    }
}

/// Fitted [`ColumnDropper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedColumnDropper {
    columns: Vec<String>,
    feature_names: Vec<String>,
    n_features_in: usize,
}

impl FittedColumnDropper {
    /// Columns removed on transform.
    pub fn dropped_columns(&self) -> &[String] {
        &self.columns
    }
}

impl<T: Table> FittedTransformer<T> for FittedColumnDropper {
    type Output = T;

    /// Drop the fitted columns. An empty drop list returns the input as is.
    fn transform(&self, data: &T) -> Result<T, PreprocessingError> {
        if self.columns.is_empty() {
            return Ok(data.clone());
        }
        Ok(data.drop(&self.columns)?)
    }
}

impl FittedState for FittedColumnDropper {
    type Params = ColumnDropperParams;

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn extract_params(&self) -> Self::Params {
        ColumnDropperParams {
            columns: self.columns.clone(),
            feature_names: self.feature_names.clone(),
            n_features_in: self.n_features_in,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.feature_names.is_empty() {
            return Err(PreprocessingError::EmptyResult(
                "ColumnDropper parameters keep no columns".to_string(),
            ));
        }
        Ok(Self {
            columns: params.columns,
            feature_names: params.feature_names,
            n_features_in: params.n_features_in,
        })
    }
}
