//! Semantic column types and dtype filters.
//!
//! Column types are explicit tags compared by equality, so a fitted dtype
//! signature can be recorded and checked without looking at the storage of
//! any particular table representation.

use super::value::Value;
use super::TableError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// Booleans. Not numeric.
    Bool,
    /// 64-bit integers.
    Int64,
    /// 64-bit floats.
    Float64,
    /// Complex numbers.
    Complex128,
    /// Free-form strings.
    Utf8,
    /// Strings drawn from a small set of levels.
    Categorical,
    /// Anything goes.
    Object,
}

impl DType {
    /// Canonical name, as accepted by [`DTypeSpec::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Complex128 => "complex128",
            DType::Utf8 => "string",
            DType::Categorical => "category",
            DType::Object => "object",
        }
    }

    /// Whether the dtype counts as numeric. Booleans do not.
    pub fn is_numeric(self) -> bool {
        matches!(self, DType::Int64 | DType::Float64 | DType::Complex128)
    }

    /// Whether a non-null cell can live in a column of this dtype.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (DType::Object, _) => true,
            (DType::Bool, Value::Bool(_)) => true,
            (DType::Int64, Value::Int(_)) => true,
            (DType::Float64, Value::Float(_) | Value::Int(_)) => true,
            (DType::Complex128, Value::Complex { .. } | Value::Float(_) | Value::Int(_)) => true,
            (DType::Utf8 | DType::Categorical, Value::Str(_)) => true,
            _ => false,
        }
    }

    /// Infer the narrowest dtype able to hold every cell.
    ///
    /// Columns with no non-null cell, or with incompatible kinds of cells,
    /// become [`DType::Object`].
    pub fn infer<'a, I>(values: I) -> DType
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut inferred: Option<DType> = None;
        for value in values {
            let current = match value {
                Value::Null => continue,
                Value::Bool(_) => DType::Bool,
                Value::Int(_) => DType::Int64,
                Value::Float(_) => DType::Float64,
                Value::Complex { .. } => DType::Complex128,
                Value::Str(_) => DType::Utf8,
            };
            inferred = Some(match inferred {
                None => current,
                Some(prev) => widen(prev, current),
            });
            if inferred == Some(DType::Object) {
                break;
            }
        }
        inferred.unwrap_or(DType::Object)
    }
}

fn widen(a: DType, b: DType) -> DType {
    use DType::{Complex128, Float64, Int64, Object};
    if a == b {
        return a;
    }
    match (a, b) {
        (Int64, Float64) | (Float64, Int64) => Float64,
        (Complex128, Int64 | Float64) | (Int64 | Float64, Complex128) => Complex128,
        _ => Object,
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of an include/exclude dtype filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeSpec {
    /// Exactly this dtype.
    Exact(DType),
    /// Any numeric dtype.
    Number,
    /// String-like columns: [`DType::Utf8`] and [`DType::Object`].
    Object,
}

impl DTypeSpec {
    /// Whether a column of `dtype` matches this entry.
    pub fn matches(self, dtype: DType) -> bool {
        match self {
            DTypeSpec::Exact(d) => d == dtype,
            DTypeSpec::Number => dtype.is_numeric(),
            DTypeSpec::Object => matches!(dtype, DType::Utf8 | DType::Object),
        }
    }
}

impl From<DType> for DTypeSpec {
    fn from(dtype: DType) -> Self {
        DTypeSpec::Exact(dtype)
    }
}

impl FromStr for DTypeSpec {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = match s.trim().to_ascii_lowercase().as_str() {
            "number" | "numeric" => DTypeSpec::Number,
            "object" | "o" => DTypeSpec::Object,
            "bool" | "boolean" => DTypeSpec::Exact(DType::Bool),
            "int" | "int64" | "i64" => DTypeSpec::Exact(DType::Int64),
            "float" | "float64" | "f64" => DTypeSpec::Exact(DType::Float64),
            "complex" | "complex128" => DTypeSpec::Exact(DType::Complex128),
            "str" | "string" | "utf8" => DTypeSpec::Exact(DType::Utf8),
            "category" | "categorical" => DTypeSpec::Exact(DType::Categorical),
            other => return Err(TableError::UnknownDType(other.to_string())),
        };
        Ok(spec)
    }
}

impl fmt::Display for DTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DTypeSpec::Exact(d) => write!(f, "{d}"),
            DTypeSpec::Number => f.write_str("number"),
            DTypeSpec::Object => f.write_str("object"),
        }
    }
}
