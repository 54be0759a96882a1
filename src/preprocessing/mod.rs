//! Preprocessing transformers for tabular ML pipelines.
//!
//! # Design Philosophy
//!
//! - **Type Safety**: `fit` returns a distinct fitted type, so a transformer
//!   cannot be used before it has been fitted.
//! - **Table Agnostic**: Name-based transformers work with any
//!   [`Table`](crate::table::Table) and return the representation they were
//!   given.
//! - **Immutable Fitted State**: Fitted transformers never change after
//!   `fit`; they can be shared across threads for concurrent `transform`.
//! - **sklearn-compatible**: `fit`, `transform`, `fit_transform` and
//!   `get_feature_names` behave like their scikit-learn counterparts.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready to project tables
//! - [`FittedState`]: Table-independent view of the fitted state
//!
//! # Available Components
//!
//! ## Selection
//! - [`ColumnSelector`]: Keep named columns
//! - [`ColumnDropper`]: Drop named columns
//! - [`TypeSelector`]: Keep columns by dtype, rejecting dtype drift
//!
//! ## Grouping
//! - [`GroupValueSplitter`]: Split a table into grouping keys and a value
//!   matrix
//!
//! ## Validation
//! - [`check_array`] / [`check_frame`]: Shape, dtype and finiteness checks
//!   configured by [`ValidationOptions`]
//!
//! # Example
//!
//! ```ignore
//! use tabular_prep::preprocessing::{ColumnSelector, FittedTransformer, Transformer};
//!
//! let fitted = ColumnSelector::new(["length", "shoesize"]).fit(&train)?;
//! let projected = fitted.transform(&test)?;
//! ```

pub mod error;
pub mod grouping;
pub mod selection;
pub mod traits;
pub mod validation;

// Re-export main types
pub use error::PreprocessingError;
pub use grouping::{GroupColumns, GroupValueSplit, GroupValueSplitter, SplitInput};
pub use selection::{
    ColumnDropper, ColumnDropperParams, ColumnSelector, ColumnSelectorParams, Columns,
    FittedColumnDropper, FittedColumnSelector, FittedTypeSelector, TypeSelector,
    TypeSelectorParams,
};
pub use traits::{FittedState, FittedTransformer, Transformer};
pub use validation::{check_array, check_frame, DTypeCoercion, ValidationOptions, ValueMatrix};
