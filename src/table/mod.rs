//! # Table abstraction
//!
//! Transformers in this crate never depend on one concrete table type. They
//! talk to the [`Table`] trait, which exposes the three capabilities every
//! column-level transformer needs: list the columns, project onto a subset,
//! and drop a subset.
//!
//! ## Available representations
//!
//! | Type | Columns | Notes |
//! |------|---------|-------|
//! | [`DataFrame`] | heterogeneous, typed | row index, dtype introspection |
//! | [`LabeledMatrix`] | `f64` only | backed by `ndarray::Array2` |
//!
//! [`CsrMatrix`] is not a `Table`; it only models sparse input so that the
//! group/value splitter can reject it explicitly.
//!
//! ## Adding a representation
//!
//! Implement [`Table`] for the new type. `select` must return columns in the
//! requested order and `drop` must keep the remaining columns in table order.
//! Only [`DataFrame`] returns `Some` from [`Table::as_data_frame`].

use thiserror::Error;

pub mod dtype;
pub mod frame;
pub mod matrix;
pub mod series;
pub mod sparse;
pub mod value;

pub use dtype::{DType, DTypeSpec};
pub use frame::DataFrame;
pub use matrix::LabeledMatrix;
pub use series::Series;
pub use sparse::CsrMatrix;
pub use value::Value;

/// Failure raised by a table representation itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A referenced column does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    /// A column name appears twice.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    /// A column length disagrees with the table's row count.
    #[error("column {column} has {got} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column.
        column: String,
        /// Row count of the table.
        expected: usize,
        /// Row count of the column.
        got: usize,
    },
    /// A cell does not fit the column's dtype.
    #[error("column {column} row {row}: {value} value does not fit dtype {dtype}")]
    IncompatibleValue {
        /// Offending column.
        column: String,
        /// Row of the cell.
        row: usize,
        /// Declared dtype.
        dtype: DType,
        /// Kind of the rejected cell.
        value: &'static str,
    },
    /// Dtype name not recognised.
    #[error("data type {0:?} not understood")]
    UnknownDType(String),
    /// Inconsistent dimensions.
    #[error("invalid shape: {0}")]
    Shape(String),
}

/// Column-level access shared by every table representation.
///
/// Implementations are cheap to reason about: `select` and `drop` return new
/// tables and never mutate `self`.
pub trait Table: Clone {
    /// Column names in order.
    fn column_names(&self) -> Vec<&str>;

    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// Number of columns.
    fn n_columns(&self) -> usize {
        self.column_names().len()
    }

    /// Project onto `names`, in the given order.
    ///
    /// # Errors
    /// [`TableError::ColumnNotFound`] for an unknown name and
    /// [`TableError::DuplicateColumn`] for a name given twice.
    fn select(&self, names: &[String]) -> Result<Self, TableError>;

    /// Remove `names`, keeping the remaining columns in order.
    ///
    /// # Errors
    /// [`TableError::ColumnNotFound`] for an unknown name.
    fn drop(&self, names: &[String]) -> Result<Self, TableError>;

    /// Downcast to the typed frame, if this is one.
    fn as_data_frame(&self) -> Option<&DataFrame> {
        None
    }
}
