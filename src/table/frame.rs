//! Heterogeneous, label-indexed data frame.

use super::dtype::{DType, DTypeSpec};
use super::series::Series;
use super::value::Value;
use super::{Table, TableError};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered collection of uniquely named, equal-length columns plus a row
/// index.
///
/// The row index defaults to `0..n_rows` and is carried through
/// [`Table::select`] and [`Table::drop`] unchanged.
///
/// # Example
/// ```
/// use tabular_prep::table::{DataFrame, Series, Table};
///
/// let df = DataFrame::from_series(vec![
///     Series::from_strs("name", &["Swen", "Victor", "Alex"]),
///     Series::from_f64("length", vec![1.82, 1.85, 1.80]),
///     Series::from_i64("shoesize", vec![42, 44, 45]),
/// ])
/// .unwrap();
///
/// assert_eq!(df.shape(), (3, 3));
/// assert_eq!(df.column_names(), vec!["name", "length", "shoesize"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    index: Vec<i64>,
    columns: Vec<Series>,
}

impl DataFrame {
    /// Create an empty frame with `n_rows` rows and no columns.
    pub fn new(n_rows: usize) -> Self {
        Self {
            index: range_index(n_rows),
            columns: Vec::new(),
        }
    }

    /// Build a frame from columns, which must have unique names and equal
    /// lengths.
    pub fn from_series(columns: Vec<Series>) -> Result<Self, TableError> {
        let n_rows = columns.first().map_or(0, Series::len);
        let mut seen = HashSet::with_capacity(columns.len());
        for series in &columns {
            if series.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    column: series.name().to_string(),
                    expected: n_rows,
                    got: series.len(),
                });
            }
            if !seen.insert(series.name()) {
                return Err(TableError::DuplicateColumn(series.name().to_string()));
            }
        }
        Ok(Self {
            index: range_index(n_rows),
            columns,
        })
    }

    /// Columns already known to be unique and of length `n_rows`.
    pub(crate) fn from_trusted(n_rows: usize, columns: Vec<Series>) -> Self {
        Self {
            index: range_index(n_rows),
            columns,
        }
    }

    /// Replace the row index.
    pub fn with_index(mut self, index: Vec<i64>) -> Result<Self, TableError> {
        if index.len() != self.n_rows() {
            return Err(TableError::LengthMismatch {
                column: "<index>".to_string(),
                expected: self.n_rows(),
                got: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Append a column.
    pub fn push_column(&mut self, series: Series) -> Result<(), TableError> {
        if !self.columns.is_empty() || !self.index.is_empty() {
            if series.len() != self.n_rows() {
                return Err(TableError::LengthMismatch {
                    column: series.name().to_string(),
                    expected: self.n_rows(),
                    got: series.len(),
                });
            }
        } else {
            self.index = range_index(series.len());
        }
        if self.column(series.name()).is_some() {
            return Err(TableError::DuplicateColumn(series.name().to_string()));
        }
        self.columns.push(series);
        Ok(())
    }

    /// Row labels.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Same frame with a fresh `0..n_rows` index.
    pub fn reset_index(mut self) -> Self {
        self.index = range_index(self.n_rows());
        self
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|s| s.name() == name)
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(n_rows, n_columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    /// `(name, dtype)` for every column, in order.
    pub fn dtypes(&self) -> Vec<(String, DType)> {
        self.columns
            .iter()
            .map(|s| (s.name().to_string(), s.dtype()))
            .collect()
    }

    /// Whether any column holds complex numbers.
    pub fn has_complex(&self) -> bool {
        self.columns.iter().any(Series::has_complex)
    }

    /// Names of columns matching the include/exclude dtype filter.
    ///
    /// With a non-empty `include`, a column is kept when it matches any
    /// include entry; otherwise every column starts as kept. Columns matching
    /// any `exclude` entry are then removed.
    pub fn select_dtypes(&self, include: &[DTypeSpec], exclude: &[DTypeSpec]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|s| include.is_empty() || include.iter().any(|spec| spec.matches(s.dtype())))
            .filter(|s| !exclude.iter().any(|spec| spec.matches(s.dtype())))
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Row-major cell matrix of shape `(n_rows, n_columns)`.
    pub fn to_value_array(&self) -> Array2<Value> {
        let (rows, cols) = self.shape();
        Array2::from_shape_fn((rows, cols), |(r, c)| self.columns[c].values()[r].clone())
    }

    /// Build a frame from a positional cell matrix.
    ///
    /// Columns are labelled `"0"`, `"1"`, ... and their dtypes are inferred
    /// from the cells.
    pub fn from_value_array(values: ArrayView2<'_, Value>) -> Self {
        let columns = values
            .columns()
            .into_iter()
            .enumerate()
            .map(|(i, col)| Series::infer(i.to_string(), col.to_vec()))
            .collect();
        Self::from_trusted(values.nrows(), columns)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|s| s.name() == name)
    }
}

fn range_index(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

impl Table for DataFrame {
    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    fn n_rows(&self) -> usize {
        self.index.len()
    }

    fn select(&self, names: &[String]) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
            let pos = self
                .position(name)
                .ok_or_else(|| TableError::ColumnNotFound(name.clone()))?;
            columns.push(self.columns[pos].clone());
        }
        Ok(Self {
            index: self.index.clone(),
            columns,
        })
    }

    fn drop(&self, names: &[String]) -> Result<Self, TableError> {
        if let Some(missing) = names.iter().find(|n| self.position(n).is_none()) {
            return Err(TableError::ColumnNotFound(missing.clone()));
        }
        let columns = self
            .columns
            .iter()
            .filter(|s| !names.iter().any(|n| n == s.name()))
            .cloned()
            .collect();
        Ok(Self {
            index: self.index.clone(),
            columns,
        })
    }

    fn as_data_frame(&self) -> Option<&DataFrame> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> DataFrame {
        DataFrame::from_series(vec![
            Series::from_strs("name", &["Swen", "Victor", "Alex"]),
            Series::from_f64("length", vec![1.82, 1.85, 1.80]),
            Series::from_i64("shoesize", vec![42, 44, 45]),
        ])
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_series_checks_lengths() {
        let err = DataFrame::from_series(vec![
            Series::from_f64("a", vec![1.0, 2.0]),
            Series::from_f64("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { .. }));
    }

    #[test]
    fn test_from_series_rejects_duplicates() {
        let err = DataFrame::from_series(vec![
            Series::from_f64("a", vec![1.0]),
            Series::from_f64("a", vec![2.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let df = people().select(&names(&["shoesize", "name"])).unwrap();
        assert_eq!(df.column_names(), vec!["shoesize", "name"]);
        assert_eq!(df.n_rows(), 3);
    }

    #[test]
    fn test_select_missing_column() {
        let err = people().select(&names(&["weight"])).unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound(name) if name == "weight"));
    }

    #[test]
    fn test_drop_keeps_remaining_order() {
        let df = people().drop(&names(&["length"])).unwrap();
        assert_eq!(df.column_names(), vec!["name", "shoesize"]);
    }

    #[test]
    fn test_drop_missing_column() {
        assert!(people().drop(&names(&["weight"])).is_err());
    }

    #[test]
    fn test_index_is_carried_and_reset() {
        let df = people().with_index(vec![10, 20, 30]).unwrap();
        let selected = df.select(&names(&["name"])).unwrap();
        assert_eq!(selected.index(), &[10, 20, 30]);
        assert_eq!(selected.reset_index().index(), &[0, 1, 2]);
    }

    #[test]
    fn test_with_index_length_mismatch() {
        assert!(people().with_index(vec![1]).is_err());
    }

    #[test]
    fn test_select_dtypes() {
        let df = people();
        assert_eq!(df.select_dtypes(&[DTypeSpec::Number], &[]), names(&["length", "shoesize"]));
        assert_eq!(
            df.select_dtypes(&[], &[DTypeSpec::Exact(DType::Int64)]),
            names(&["name", "length"])
        );
        assert_eq!(
            df.select_dtypes(&[DTypeSpec::Exact(DType::Int64), DTypeSpec::Object], &[]),
            names(&["name", "shoesize"])
        );
    }

    #[test]
    fn test_value_array_round_trip_shape() {
        let df = people();
        let values = df.to_value_array();
        assert_eq!(values.dim(), (3, 3));
        assert_eq!(values[[1, 0]], Value::from("Victor"));
        assert_eq!(values[[2, 2]], Value::Int(45));

        let rebuilt = DataFrame::from_value_array(values.view());
        assert_eq!(rebuilt.column_names(), vec!["0", "1", "2"]);
        assert_eq!(
            rebuilt.dtypes().into_iter().map(|(_, d)| d).collect::<Vec<_>>(),
            vec![DType::Utf8, DType::Float64, DType::Int64]
        );
    }

    #[test]
    fn test_push_column() {
        let mut df = DataFrame::default();
        df.push_column(Series::from_f64("a", vec![1.0, 2.0])).unwrap();
        assert_eq!(df.index(), &[0, 1]);
        assert!(df.push_column(Series::from_f64("b", vec![1.0])).is_err());
        assert!(df.push_column(Series::from_f64("a", vec![1.0, 2.0])).is_err());
    }
}
