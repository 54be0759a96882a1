//! Group/value splitting.
//!
//! Splits a table into the columns an estimator groups by and the numeric
//! matrix it fits on. Grouping keys are returned as a [`DataFrame`] with a
//! fresh `0..n` index; values as a [`ValueMatrix`] whose rows line up with
//! the grouping frame.
//!
//! # Example
//! ```ignore
//! use tabular_prep::preprocessing::{GroupColumns, GroupValueSplitter};
//!
//! let splitter = GroupValueSplitter::new("GroupedPredictor");
//! let split = splitter.split(&df, &GroupColumns::from("shop"))?;
//! let (groups, values) = split.into_parts();
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::validation::{
    check_array, check_frame, complex_data_error, ensure_no_complex, ValidationOptions,
    ValueMatrix,
};
use crate::table::{CsrMatrix, DTypeSpec, DataFrame, LabeledMatrix, Table, Value};
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Which columns are grouping keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupColumns {
    /// Column labels, for labeled tables. Each label may appear once; a
    /// repeated label fails the split with
    /// [`PreprocessingError::GroupSplit`].
    Names(Vec<String>),
    /// Column positions, for positional arrays. Negative positions count
    /// from the last column.
    Positions(Vec<isize>),
}

impl GroupColumns {
    /// Positions, possibly negative.
    pub fn positions<I: IntoIterator<Item = isize>>(positions: I) -> Self {
        GroupColumns::Positions(positions.into_iter().collect())
    }

    /// Number of group columns requested.
    pub fn len(&self) -> usize {
        match self {
            GroupColumns::Names(names) => names.len(),
            GroupColumns::Positions(positions) => positions.len(),
        }
    }

    /// Whether no group column is requested.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for GroupColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupColumns::Names(names) => write!(f, "{names:?}"),
            GroupColumns::Positions(positions) => write!(f, "{positions:?}"),
        }
    }
}

impl From<&str> for GroupColumns {
    fn from(name: &str) -> Self {
        GroupColumns::Names(vec![name.to_string()])
    }
}

impl From<String> for GroupColumns {
    fn from(name: String) -> Self {
        GroupColumns::Names(vec![name])
    }
}

impl From<Vec<String>> for GroupColumns {
    fn from(names: Vec<String>) -> Self {
        GroupColumns::Names(names)
    }
}

impl From<Vec<&str>> for GroupColumns {
    fn from(names: Vec<&str>) -> Self {
        GroupColumns::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for GroupColumns {
    fn from(names: &[&str]) -> Self {
        GroupColumns::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<usize> for GroupColumns {
    fn from(position: usize) -> Self {
        GroupColumns::Positions(vec![position as isize])
    }
}

impl From<Vec<usize>> for GroupColumns {
    fn from(positions: Vec<usize>) -> Self {
        GroupColumns::Positions(positions.into_iter().map(|p| p as isize).collect())
    }
}

/// Input accepted by [`GroupValueSplitter::split`].
#[derive(Clone, Copy, Debug)]
pub enum SplitInput<'a> {
    /// Labeled, typed table.
    Frame(&'a DataFrame),
    /// Labeled numeric matrix.
    Matrix(&'a LabeledMatrix),
    /// Positional cell array without labels.
    Array(ArrayView2<'a, Value>),
    /// Sparse matrix. Always rejected.
    Sparse(&'a CsrMatrix),
}

impl<'a> From<&'a DataFrame> for SplitInput<'a> {
    fn from(frame: &'a DataFrame) -> Self {
        SplitInput::Frame(frame)
    }
}

impl<'a> From<&'a LabeledMatrix> for SplitInput<'a> {
    fn from(matrix: &'a LabeledMatrix) -> Self {
        SplitInput::Matrix(matrix)
    }
}

impl<'a> From<ArrayView2<'a, Value>> for SplitInput<'a> {
    fn from(array: ArrayView2<'a, Value>) -> Self {
        SplitInput::Array(array)
    }
}

impl<'a> From<&'a Array2<Value>> for SplitInput<'a> {
    fn from(array: &'a Array2<Value>) -> Self {
        SplitInput::Array(array.view())
    }
}

impl<'a> From<&'a CsrMatrix> for SplitInput<'a> {
    fn from(matrix: &'a CsrMatrix) -> Self {
        SplitInput::Sparse(matrix)
    }
}

/// Result of a split.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupValueSplit {
    /// Grouping columns, index reset to `0..n`.
    pub groups: DataFrame,
    /// Remaining columns, row-aligned with `groups`.
    pub values: ValueMatrix,
}

impl GroupValueSplit {
    /// `(groups, values)`.
    pub fn into_parts(self) -> (DataFrame, ValueMatrix) {
        (self.groups, self.values)
    }
}

/// Splits tables into grouping columns and a value matrix.
///
/// Configuration:
/// - `estimator`: name used in error messages.
/// - `min_value_columns` (default 1): the table must have at least this
///   many columns, and at least this many must remain after removing the
///   group columns.
/// - `validate_values` (default `true`): run [`check_array`] on the value
///   matrix.
/// - `options`: [`ValidationOptions`] for the numeric grouping columns and
///   the value matrix.
#[derive(Clone, Debug)]
pub struct GroupValueSplitter {
    estimator: String,
    min_value_columns: usize,
    validate_values: bool,
    options: ValidationOptions,
}

impl Default for GroupValueSplitter {
    fn default() -> Self {
        Self::new("")
    }
}

impl GroupValueSplitter {
    /// Create a splitter for the named estimator.
    pub fn new(estimator: impl Into<String>) -> Self {
        Self {
            estimator: estimator.into(),
            min_value_columns: 1,
            validate_values: true,
            options: ValidationOptions::default(),
        }
    }

    /// Minimum number of value columns.
    pub fn with_min_value_columns(mut self, n: usize) -> Self {
        self.min_value_columns = n;
        self
    }

    /// Whether to validate the value matrix.
    pub fn with_value_validation(mut self, validate: bool) -> Self {
        self.validate_values = validate;
        self
    }

    /// Validation options for numeric group columns and the value matrix.
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }


    /// Split `input` into grouping columns and values.
    ///
    /// Complex values and sparse input are rejected before anything else,
    /// whatever the validation settings.
    ///
    /// # Errors
    /// - [`PreprocessingError::DataFormat`] for complex values or sparse input.
    /// - [`PreprocessingError::GroupSplit`] if the group columns cannot be
    ///   partitioned out of the input.
    /// - [`PreprocessingError::Validation`] for shape and finiteness
    ///   violations, or missing values in non-numeric group columns.
    pub fn split<'a>(
        &self,
        input: impl Into<SplitInput<'a>>,
        groups: &GroupColumns,
    ) -> Result<GroupValueSplit, PreprocessingError> {
        match input.into() {
            SplitInput::Frame(frame) => self.split_labeled(frame, groups),
            SplitInput::Matrix(matrix) => self.split_labeled(&matrix.to_data_frame(), groups),
            SplitInput::Array(array) => self.split_positional(array, groups),
            SplitInput::Sparse(_) => Err(PreprocessingError::DataFormat(format!(
                "The estimator {} does not work on sparse matrices",
                self.estimator
            ))),
        }
    }

    fn split_labeled(
        &self,
        frame: &DataFrame,
        groups: &GroupColumns,
    ) -> Result<GroupValueSplit, PreprocessingError> {
        // A complex dtype is rejected even when every cell is null.
        if frame.has_complex() {
            return Err(complex_data_error());
        }
        self.check_shape(frame.to_value_array().view())?;

        let names = match groups {
            GroupColumns::Names(names) => names,
            GroupColumns::Positions(_) => return Err(partition_error(groups)),
        };
        let group_frame = frame.select(names).map_err(|_| partition_error(groups))?;
        let value_frame = frame.drop(names).map_err(|_| partition_error(groups))?;

        self.finish(group_frame, value_frame.to_value_array())
    }

    fn split_positional(
        &self,
        array: ArrayView2<'_, Value>,
        groups: &GroupColumns,
    ) -> Result<GroupValueSplit, PreprocessingError> {
        ensure_no_complex(array)?;
        self.check_shape(array)?;

        let positions = match groups {
            GroupColumns::Positions(positions) => resolve_positions(positions, array.ncols())
                .ok_or_else(|| partition_error(groups))?,
            GroupColumns::Names(_) => return Err(partition_error(groups)),
        };
        let dropped: HashSet<usize> = positions.iter().copied().collect();
        let kept: Vec<usize> = (0..array.ncols()).filter(|p| !dropped.contains(p)).collect();

        let group_frame = DataFrame::from_value_array(array.select(Axis(1), &positions).view());
        let values = array.select(Axis(1), &kept);

        self.finish(group_frame, values)
    }

    /// Shape check on the whole input; NaN and infinity are left for later.
    fn check_shape(&self, cells: ArrayView2<'_, Value>) -> Result<(), PreprocessingError> {
        let options = ValidationOptions::permissive().with_min_features(self.min_value_columns);
        check_array(cells, &options).map(|_| ())
    }

    fn finish(
        &self,
        group_frame: DataFrame,
        values: Array2<Value>,
    ) -> Result<GroupValueSplit, PreprocessingError> {
        if values.ncols() < self.min_value_columns {
            return Err(PreprocessingError::Validation(format!(
                "The estimator {} requires at least {} value column(s), found {}",
                self.estimator,
                self.min_value_columns,
                values.ncols()
            )));
        }

        let groups = self.check_grouping_columns(group_frame)?;
        let values = if self.validate_values {
            check_array(values.view(), &self.options)?
        } else {
            ValueMatrix::Mixed(values)
        };

        debug!(
            estimator = %self.estimator,
            rows = groups.n_rows(),
            group_columns = groups.n_columns(),
            value_columns = values.ncols(),
            "split groups and values"
        );
        Ok(GroupValueSplit { groups, values })
    }

    /// Numeric group columns get the full validation; the others are only
    /// checked for missing values.
    fn check_grouping_columns(&self, group_frame: DataFrame) -> Result<DataFrame, PreprocessingError> {
        let numeric = group_frame.select_dtypes(&[DTypeSpec::Number], &[]);
        if !numeric.is_empty() {
            trace!(columns = ?numeric, "validating numeric group columns");
            check_frame(&group_frame.select(&numeric)?, &self.options)?;
        }

        let non_numeric = group_frame.select_dtypes(&[], &[DTypeSpec::Number]);
        let with_missing: Vec<&str> = non_numeric
            .iter()
            .filter_map(|name| group_frame.column(name))
            .filter(|series| series.has_missing())
            .map(|series| series.name())
            .collect();
        if !with_missing.is_empty() {
            return Err(PreprocessingError::Validation(format!(
                "Grouping columns {with_missing:?} contain missing values"
            )));
        }

        Ok(group_frame.reset_index())
    }
}

fn partition_error(groups: &GroupColumns) -> PreprocessingError {
    PreprocessingError::GroupSplit {
        groups: groups.to_string(),
    }
}

fn resolve_positions(positions: &[isize], n_cols: usize) -> Option<Vec<usize>> {
    positions
        .iter()
        .map(|&p| {
            let resolved = if p < 0 { n_cols as isize + p } else { p };
            (0..n_cols as isize)
                .contains(&resolved)
                .then_some(resolved as usize)
        })
        .collect()
}
