//! Core traits for column transformers.
//!
//! This module defines the fit/transform contract:
//! - [`Transformer`]: the unfitted, configurable transformer; `fit` learns
//!   from a table and returns the fitted form.
//! - [`FittedTransformer`]: projects tables using the fitted state.
//! - [`FittedState`]: table-independent accessors for the fitted state.
//!
//! Unfitted and fitted transformers are distinct types, so calling
//! `transform` on something that was never fitted does not compile.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;
use crate::table::Table;

/// Trait for unfitted transformers with hyperparameters.
///
/// # Type Parameters
/// - `T`: The table representation the transformer is fitted on.
///
/// # Example
/// ```ignore
/// use tabular_prep::preprocessing::{ColumnDropper, FittedTransformer, Transformer};
///
/// let dropper = ColumnDropper::new(["name"]);
/// let fitted = dropper.fit(&df)?;
/// let projected = fitted.transform(&df)?;
/// ```
pub trait Transformer<T: Table>: Clone {
    /// Output of `transform`.
    type Output;
    /// The fitted transformer type.
    type Fitted: FittedTransformer<T, Output = Self::Output>;

    /// Fit the transformer to a table.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the table does not satisfy the
    /// transformer's requirements (missing columns, wrong representation,
    /// empty selection).
    fn fit(&self, data: &T) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit with a target, which column transformers ignore.
    ///
    /// Present so transformers can sit in pipelines that always pass a
    /// target alongside the features.
    fn fit_with_target<Y: ?Sized>(
        &self,
        data: &T,
        _target: Option<&Y>,
    ) -> Result<Self::Fitted, PreprocessingError> {
        self.fit(data)
    }

    /// Fit the transformer and transform the same table.
    fn fit_transform(&self, data: &T) -> Result<Self::Output, PreprocessingError> {
        self.fit(data)?.transform(data)
    }
}

/// Trait for fitted transformers ready to project tables.
pub trait FittedTransformer<T: Table>: FittedState {
    /// Output of `transform`.
    type Output;

    /// Transform a table using the fitted state.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the table cannot be projected.
    fn transform(&self, data: &T) -> Result<Self::Output, PreprocessingError>;
}

/// Accessors for fitted state that do not depend on the table type.
pub trait FittedState: Clone {
    /// Serializable representation of the fitted state.
    type Params: SerializableParams;

    /// Names of the columns the transformer retains.
    fn feature_names(&self) -> &[String];

    /// Number of columns in the table seen during fit.
    fn n_features_in(&self) -> usize;

    /// Extract the fitted state as a serializable value.
    fn extract_params(&self) -> Self::Params;

    /// Rebuild a fitted transformer from extracted parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Owned copy of [`FittedState::feature_names`].
    fn get_feature_names(&self) -> Vec<String> {
        self.feature_names().to_vec()
    }
}
