//! Generic array validation.
//!
//! [`check_array`] is the shape/dtype/finiteness gate the group/value
//! splitter runs its inputs through. What it enforces is driven entirely by
//! [`ValidationOptions`].
//!
//! # Example
//! ```ignore
//! use tabular_prep::preprocessing::{check_frame, ValidationOptions};
//!
//! let options = ValidationOptions::default().allow_nan(true);
//! let matrix = check_frame(&df, &options)?;
//! assert_eq!(matrix.ncols(), df.n_columns());
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::table::{DataFrame, Value};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Target representation for validated cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DTypeCoercion {
    /// Convert every cell to `f64`; strings and complex numbers are rejected.
    #[default]
    Float64,
    /// Keep cells as they are.
    Preserve,
}

/// Options controlling [`check_array`].
///
/// Defaults: float coercion, at least one sample, at least one feature, no
/// NaN, no infinity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Target representation.
    pub dtype: DTypeCoercion,
    /// Minimum number of rows. `0` disables the check.
    pub ensure_min_samples: usize,
    /// Minimum number of columns. `0` disables the check.
    pub ensure_min_features: usize,
    /// Accept missing values (null or NaN).
    pub allow_nan: bool,
    /// Accept positive or negative infinity.
    pub allow_infinite: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            dtype: DTypeCoercion::Float64,
            ensure_min_samples: 1,
            ensure_min_features: 1,
            allow_nan: false,
            allow_infinite: false,
        }
    }
}

impl ValidationOptions {
    /// Options that only check shape: cells are preserved, NaN and infinity
    /// allowed.
    pub fn permissive() -> Self {
        Self {
            dtype: DTypeCoercion::Preserve,
            allow_nan: true,
            allow_infinite: true,
            ..Self::default()
        }
    }

    /// Set the target representation.
    pub fn with_dtype(mut self, dtype: DTypeCoercion) -> Self {
        self.dtype = dtype;
        self
    }

    /// Set the minimum number of rows.
    pub fn with_min_samples(mut self, n: usize) -> Self {
        self.ensure_min_samples = n;
        self
    }

    /// Set the minimum number of columns.
    pub fn with_min_features(mut self, n: usize) -> Self {
        self.ensure_min_features = n;
        self
    }

    /// Accept or reject missing values.
    pub fn allow_nan(mut self, allow: bool) -> Self {
        self.allow_nan = allow;
        self
    }

    /// Accept or reject infinite values.
    pub fn allow_infinite(mut self, allow: bool) -> Self {
        self.allow_infinite = allow;
        self
    }

    /// Parse options from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, PreprocessingError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Output of [`check_array`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueMatrix {
    /// Cells coerced to `f64`.
    Numeric(Array2<f64>),
    /// Cells as given.
    Mixed(Array2<Value>),
}

impl ValueMatrix {
    /// `(n_rows, n_cols)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            ValueMatrix::Numeric(m) => m.dim(),
            ValueMatrix::Mixed(m) => m.dim(),
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.shape().0
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.shape().1
    }

    /// The `f64` matrix, if the cells were coerced.
    pub fn as_numeric(&self) -> Option<&Array2<f64>> {
        match self {
            ValueMatrix::Numeric(m) => Some(m),
            ValueMatrix::Mixed(_) => None,
        }
    }

    /// Convert to `f64`, coercing mixed cells.
    ///
    /// # Errors
    /// [`PreprocessingError::Validation`] if a cell has no real-valued view.
    pub fn into_numeric(self) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            ValueMatrix::Numeric(m) => Ok(m),
            ValueMatrix::Mixed(m) => to_f64(m.view()),
        }
    }
}

/// Validate a cell matrix against `options`.
///
/// Checks run in this order: complex cells, dtype coercion, finiteness,
/// minimum rows, minimum columns.
///
/// # Errors
/// - [`PreprocessingError::DataFormat`] for complex cells.
/// - [`PreprocessingError::Validation`] for unconvertible cells, disallowed
///   NaN or infinity, or too few rows or columns.
pub fn check_array(
    values: ArrayView2<'_, Value>,
    options: &ValidationOptions,
) -> Result<ValueMatrix, PreprocessingError> {
    ensure_no_complex(values)?;

    let matrix = match options.dtype {
        DTypeCoercion::Float64 => {
            let numeric = to_f64(values)?;
            check_finite(numeric.iter().copied(), options)?;
            ValueMatrix::Numeric(numeric)
        }
        DTypeCoercion::Preserve => {
            check_finite(
                values.iter().map(|v| match v {
                    Value::Null => f64::NAN,
                    Value::Float(f) => *f,
                    _ => 0.0,
                }),
                options,
            )?;
            ValueMatrix::Mixed(values.to_owned())
        }
    };

    let (rows, cols) = values.dim();
    if options.ensure_min_samples > 0 && rows < options.ensure_min_samples {
        return Err(PreprocessingError::Validation(format!(
            "Found array with {rows} sample(s) (shape=({rows}, {cols})) while a minimum of {} is required.",
            options.ensure_min_samples
        )));
    }
    if options.ensure_min_features > 0 && cols < options.ensure_min_features {
        return Err(PreprocessingError::Validation(format!(
            "Found array with {cols} feature(s) (shape=({rows}, {cols})) while a minimum of {} is required.",
            options.ensure_min_features
        )));
    }

    trace!(rows, cols, dtype = ?options.dtype, "array validated");
    Ok(matrix)
}

/// Validate every column of a frame, see [`check_array`].
pub fn check_frame(
    frame: &DataFrame,
    options: &ValidationOptions,
) -> Result<ValueMatrix, PreprocessingError> {
    check_array(frame.to_value_array().view(), options)
}

/// Reject complex cells.
pub(crate) fn ensure_no_complex(values: ArrayView2<'_, Value>) -> Result<(), PreprocessingError> {
    if values.iter().any(Value::is_complex) {
        return Err(complex_data_error());
    }
    Ok(())
}

pub(crate) fn complex_data_error() -> PreprocessingError {
    PreprocessingError::DataFormat("Complex data not supported".to_string())
}

fn to_f64(values: ArrayView2<'_, Value>) -> Result<Array2<f64>, PreprocessingError> {
    let mut out = Array2::zeros(values.dim());
    for ((idx, cell), target) in values.indexed_iter().zip(out.iter_mut()) {
        *target = cell.as_f64().ok_or_else(|| {
            PreprocessingError::Validation(format!(
                "could not convert {} value '{cell}' at {idx:?} to float",
                cell.kind()
            ))
        })?;
    }
    Ok(out)
}

fn check_finite(
    values: impl Iterator<Item = f64>,
    options: &ValidationOptions,
) -> Result<(), PreprocessingError> {
    if options.allow_nan && options.allow_infinite {
        return Ok(());
    }
    for v in values {
        if v.is_nan() && !options.allow_nan {
            return Err(PreprocessingError::Validation(
                "Input contains NaN.".to_string(),
            ));
        }
        if v.is_infinite() && !options.allow_infinite {
            return Err(PreprocessingError::Validation(
                "Input contains infinity.".to_string(),
            ));
        }
    }
    Ok(())
}
