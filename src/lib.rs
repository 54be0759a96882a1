//! # tabular-prep
//!
//! Column-level preprocessing for tabular machine-learning pipelines, with a
//! strict separation between configuring a transformer and using its fitted
//! form.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: `fit` turns a transformer into a distinct
//!   fitted type; only fitted types can `transform`.
//! - **Table Agnosticism**: Transformers talk to the [`Table`] trait, so the
//!   same selector works on a typed [`DataFrame`](table::DataFrame) or an
//!   `ndarray`-backed [`LabeledMatrix`](table::LabeledMatrix).
//! - **Explicit Validation**: The group/value splitter validates through
//!   [`ValidationOptions`](preprocessing::ValidationOptions) rather than
//!   loosely-typed keyword options.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabular_prep::preprocessing::{ColumnSelector, FittedTransformer, Transformer};
//! use tabular_prep::table::{DataFrame, Series, Table};
//!
//! let df = DataFrame::from_series(vec![
//!     Series::from_strs("name", &["Swen", "Victor", "Alex"]),
//!     Series::from_f64("length", vec![1.82, 1.85, 1.80]),
//! ])
//! .unwrap();
//!
//! let fitted = ColumnSelector::new("length").fit(&df).unwrap();
//! let lengths = fitted.transform(&df).unwrap();
//! assert_eq!(lengths.column_names(), vec!["length"]);
//! ```
//!
//! ## Module Structure
//!
//! - `table`: Table abstraction, cell values, dtypes and representations
//! - `preprocessing`: Selection transformers, group/value splitting, validation
//! - `serialization`: Byte encoding of fitted parameters

/// Table abstraction and concrete table representations.
pub mod table;

/// Column transformers, group/value splitting and validation.
pub mod preprocessing;

/// Fitted parameter persistence helpers.
pub mod serialization;

/// Re-export of the core table types for convenient usage.
pub use table::{DType, DataFrame, Series, Table, Value};

/// Re-export of the traits needed to fit and apply transformers.
pub mod prelude {
    pub use crate::preprocessing::{
        ColumnDropper, ColumnSelector, FittedState, FittedTransformer, GroupColumns,
        GroupValueSplitter, PreprocessingError, Transformer, TypeSelector, ValidationOptions,
    };
    pub use crate::table::{DType, DTypeSpec, DataFrame, LabeledMatrix, Series, Table, Value};
}
