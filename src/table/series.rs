//! Named, typed columns.

use super::dtype::DType;
use super::value::Value;
use super::TableError;
use serde::{Deserialize, Serialize};

/// A named column with a declared dtype.
///
/// Every non-null cell is compatible with the dtype. Integer cells stored in
/// a `Float64` column are widened to floats on construction, and real cells
/// stored in a `Complex128` column get a zero imaginary part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    dtype: DType,
    values: Vec<Value>,
}

impl Series {
    /// Create a series, checking every cell against `dtype`.
    pub fn new(
        name: impl Into<String>,
        dtype: DType,
        values: Vec<Value>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        if let Some((row, value)) = values.iter().enumerate().find(|(_, v)| !dtype.accepts(v)) {
            return Err(TableError::IncompatibleValue {
                column: name,
                row,
                dtype,
                value: value.kind(),
            });
        }
        let values = values.into_iter().map(|v| coerce(dtype, v)).collect();
        Ok(Self {
            name,
            dtype,
            values,
        })
    }

    /// Create a series whose dtype is inferred from its cells.
    pub fn infer(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = DType::infer(&values);
        let values = values.into_iter().map(|v| coerce(dtype, v)).collect();
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// `Float64` series.
    pub fn from_f64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::trusted(name, DType::Float64, values.into_iter().map(Value::Float))
    }

    /// `Int64` series without missing values.
    pub fn from_i64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::trusted(name, DType::Int64, values.into_iter().map(Value::Int))
    }

    /// `Int64` series where `None` is missing.
    pub fn from_opt_i64(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self::trusted(name, DType::Int64, values.into_iter().map(Value::from))
    }

    /// `Bool` series.
    pub fn from_bools(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::trusted(name, DType::Bool, values.into_iter().map(Value::Bool))
    }

    /// `Utf8` series.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::trusted(name, DType::Utf8, values.iter().map(|s| Value::from(*s)))
    }

    /// `Utf8` series where `None` is missing.
    pub fn from_opt_strs(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::trusted(name, DType::Utf8, values.iter().map(|s| Value::from(*s)))
    }

    /// `Categorical` series.
    pub fn categorical(name: impl Into<String>, values: &[&str]) -> Self {
        Self::trusted(
            name,
            DType::Categorical,
            values.iter().map(|s| Value::from(*s)),
        )
    }

    /// `Complex128` series from `(re, im)` pairs.
    pub fn from_complex(name: impl Into<String>, values: Vec<(f64, f64)>) -> Self {
        Self::trusted(
            name,
            DType::Complex128,
            values.into_iter().map(|(re, im)| Value::Complex { re, im }),
        )
    }

    fn trusted(name: impl Into<String>, dtype: DType, values: impl Iterator<Item = Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values: values.collect(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared dtype.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Cells in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Cell at `row`.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any cell is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Value::is_missing)
    }

    /// Whether any cell is a complex number.
    pub fn has_complex(&self) -> bool {
        self.dtype == DType::Complex128 || self.values.iter().any(Value::is_complex)
    }
}

fn coerce(dtype: DType, value: Value) -> Value {
    match (dtype, value) {
        (DType::Float64, Value::Int(i)) => Value::Float(i as f64),
        (DType::Complex128, Value::Int(i)) => Value::Complex {
            re: i as f64,
            im: 0.0,
        },
        (DType::Complex128, Value::Float(re)) => Value::Complex { re, im: 0.0 },
        (_, v) => v,
    }
}
