//! Dtype-based column selection.
//!
//! [`TypeSelector`] keeps the columns of a [`DataFrame`] whose dtype passes
//! an include/exclude filter. The fitted selector remembers the dtype of
//! every column seen during fit and refuses to transform a frame whose
//! dtypes have drifted, including columns it does not select.
//!
//! Transform re-applies the dtype filter to the incoming frame rather than
//! replaying the fitted column list. Since the whole dtype signature must
//! match first, both give the same columns.
//!
//! # Example
//! ```ignore
//! use tabular_prep::preprocessing::{FittedTransformer, Transformer, TypeSelector};
//! use tabular_prep::table::DType;
//!
//! let selector = TypeSelector::new().exclude(DType::Int64);
//! let fitted = selector.fit(&df)?;
//! let floats_and_strings = fitted.transform(&df)?;
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedState, FittedTransformer, Transformer};
use crate::serialization::SerializableParams;
use crate::table::{DType, DTypeSpec, DataFrame, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn require_frame<T: Table>(data: &T) -> Result<&DataFrame, PreprocessingError> {
    data.as_data_frame().ok_or_else(|| {
        PreprocessingError::TypeMismatch(
            "Provided variable X is not of type DataFrame".to_string(),
        )
    })
}

fn format_signature(dtypes: &[(String, DType)]) -> String {
    dtypes
        .iter()
        .map(|(name, dtype)| format!("{name}: {dtype}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Selects [`DataFrame`] columns by dtype.
///
/// With no include entries every column starts selected; exclude entries
/// then remove columns. At least one of the two lists must be non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSelector {
    include: Vec<DTypeSpec>,
    exclude: Vec<DTypeSpec>,
}

impl TypeSelector {
    /// Create a selector with empty filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include entry.
    pub fn include(mut self, spec: impl Into<DTypeSpec>) -> Self {
        self.include.push(spec.into());
        self
    }

    /// Add an exclude entry.
    pub fn exclude(mut self, spec: impl Into<DTypeSpec>) -> Self {
        self.exclude.push(spec.into());
        self
    }

    /// Build from dtype names such as `"int64"`, `"object"` or `"number"`.
    pub fn from_names(include: &[&str], exclude: &[&str]) -> Result<Self, PreprocessingError> {
        let parse = |names: &[&str]| {
            names
                .iter()
                .map(|n| {
                    n.parse::<DTypeSpec>()
                        .map_err(|e| PreprocessingError::InvalidParameter(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            include: parse(include)?,
            exclude: parse(exclude)?,
        })
    }

    fn check_params(&self) -> Result<(), PreprocessingError> {
        if self.include.is_empty() && self.exclude.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "at least one of include or exclude must be nonempty".to_string(),
            ));
        }
        let overlap: Vec<String> = self
            .include
            .iter()
            .filter(|spec| self.exclude.contains(spec))
            .map(ToString::to_string)
            .collect();
        if !overlap.is_empty() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "include and exclude overlap on {overlap:?}"
            )));
        }
        Ok(())
    }
}

/// Serializable parameters for a fitted [`TypeSelector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeSelectorParams {
    /// Include entries.
    pub include: Vec<DTypeSpec>,
    /// Exclude entries.
    pub exclude: Vec<DTypeSpec>,
    /// Dtype of every column seen during fit, in order.
    pub dtypes: Vec<(String, DType)>,
    /// Columns selected during fit.
    pub feature_names: Vec<String>,
}

impl SerializableParams for TypeSelectorParams {
    const KIND: &'static str = "type_selector";
}

impl<T: Table> Transformer<T> for TypeSelector {
    type Output = DataFrame;
    type Fitted = FittedTypeSelector;

    fn fit(&self, data: &T) -> Result<Self::Fitted, PreprocessingError> {
        let frame = require_frame(data)?;
        self.check_params()?;

        let dtypes = frame.dtypes();
        let feature_names = frame.select_dtypes(&self.include, &self.exclude);
        if feature_names.is_empty() {
            return Err(PreprocessingError::EmptyResult(
                "Provided type(s) results in empty dataframe".to_string(),
            ));
        }

        debug!(
            selected = ?feature_names,
            n_columns = dtypes.len(),
            "fitted TypeSelector"
        );
        Ok(FittedTypeSelector {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            dtypes,
            feature_names,
        })
    }
}

/// Fitted [`TypeSelector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedTypeSelector {
    include: Vec<DTypeSpec>,
    exclude: Vec<DTypeSpec>,
    dtypes: Vec<(String, DType)>,
    feature_names: Vec<String>,
}

impl FittedTypeSelector {
    /// Dtype of every column seen during fit.
    pub fn dtypes(&self) -> &[(String, DType)] {
        &self.dtypes
    }

    fn check_dtypes(&self, frame: &DataFrame) -> Result<(), PreprocessingError> {
        let current = frame.dtypes();
        let same_labels = current.len() == self.dtypes.len()
            && current
                .iter()
                .zip(&self.dtypes)
                .all(|((a, _), (b, _))| a == b);
        if !same_labels {
            return Err(PreprocessingError::DTypeMismatch(
                "Columns were not equal during fit and transform".to_string(),
            ));
        }
        if current != self.dtypes {
            return Err(PreprocessingError::DTypeMismatch(format!(
                "Column dtypes were not equal during fit and transform. Fit types: [{}], transform: [{}]",
                format_signature(&self.dtypes),
                format_signature(&current)
            )));
        }
        Ok(())
    }
}

impl<T: Table> FittedTransformer<T> for FittedTypeSelector {
    type Output = DataFrame;

    fn transform(&self, data: &T) -> Result<DataFrame, PreprocessingError> {
        let frame = require_frame(data)?;
        self.check_dtypes(frame)?;
        let names = frame.select_dtypes(&self.include, &self.exclude);
        Ok(frame.select(&names)?)
    }
}

impl FittedState for FittedTypeSelector {
    type Params = TypeSelectorParams;

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn n_features_in(&self) -> usize {
        self.dtypes.len()
    }

    fn extract_params(&self) -> Self::Params {
        TypeSelectorParams {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            dtypes: self.dtypes.clone(),
            feature_names: self.feature_names.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.feature_names.is_empty() {
            return Err(PreprocessingError::EmptyResult(
                "TypeSelector parameters select no columns".to_string(),
            ));
        }
        Ok(Self {
            include: params.include,
            exclude: params.exclude,
            dtypes: params.dtypes,
            feature_names: params.feature_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{LabeledMatrix, Series};
    use ndarray::array;

    fn people() -> DataFrame {
        DataFrame::from_series(vec![
            Series::from_strs("name", &["Swen", "Victor", "Alex"]),
            Series::from_f64("length", vec![1.82, 1.85, 1.80]),
            Series::from_i64("shoesize", vec![42, 44, 45]),
        ])
        .unwrap()
    }

    #[test]
    fn test_exclude_single_type() {
        let out = TypeSelector::new()
            .exclude(DType::Int64)
            .fit_transform(&people())
            .unwrap();
        assert_eq!(out.column_names(), vec!["name", "length"]);
    }

    #[test]
    fn test_include_multiple_types_by_name() {
        let selector = TypeSelector::from_names(&["int64", "object"], &[]).unwrap();
        let fitted = selector.fit(&people()).unwrap();
        assert_eq!(
            fitted.feature_names(),
            &["name".to_string(), "shoesize".to_string()]
        );
        assert_eq!(fitted.n_features_in(), 3);
    }

    #[test]
    fn test_unknown_type_name() {
        let err = TypeSelector::from_names(&["datetime64"], &[]).unwrap_err();
        assert!(matches!(err, PreprocessingError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_filters_rejected() {
        let err = TypeSelector::new().fit(&people()).unwrap_err();
        assert!(matches!(err, PreprocessingError::InvalidParameter(_)));
    }

    #[test]
    fn test_overlapping_filters_rejected() {
        let err = TypeSelector::new()
            .include(DTypeSpec::Number)
            .exclude(DTypeSpec::Number)
            .fit(&people())
            .unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_empty_selection() {
        let err = TypeSelector::new()
            .include(DType::Bool)
            .fit(&people())
            .unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyResult(_)));
    }

    #[test]
    fn test_requires_data_frame() {
        let m = LabeledMatrix::new(vec!["a"], array![[1.0]]).unwrap();
        let selector = TypeSelector::new().include(DTypeSpec::Number);
        let err = selector.fit(&m).unwrap_err();
        assert!(matches!(err, PreprocessingError::TypeMismatch(_)));

        let fitted = selector.fit(&people()).unwrap();
        let err = fitted.transform(&m).unwrap_err();
        assert!(matches!(err, PreprocessingError::TypeMismatch(_)));
    }

    #[test]
    fn test_input_type_checked_before_filters() {
        let m = LabeledMatrix::new(vec!["a"], array![[1.0]]).unwrap();
        let err = TypeSelector::new().fit(&m).unwrap_err();
        assert!(matches!(err, PreprocessingError::TypeMismatch(_)));
    }

    #[test]
    fn test_dtype_drift_in_unselected_column() {
        let fitted = TypeSelector::new()
            .include(DTypeSpec::Number)
            .fit(&people())
            .unwrap();

        let drifted = DataFrame::from_series(vec![
            Series::categorical("name", &["Swen", "Victor", "Alex"]),
            Series::from_f64("length", vec![1.82, 1.85, 1.80]),
            Series::from_i64("shoesize", vec![42, 44, 45]),
        ])
        .unwrap();
        let err = fitted.transform(&drifted).unwrap_err();
        match err {
            PreprocessingError::DTypeMismatch(msg) => {
                assert!(msg.contains("name: string"));
                assert!(msg.contains("name: category"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_column_set_change_rejected() {
        let fitted = TypeSelector::new()
            .include(DTypeSpec::Number)
            .fit(&people())
            .unwrap();

        let mut extra = people();
        extra
            .push_column(Series::from_f64("weight", vec![70.0, 80.0, 90.0]))
            .unwrap();
        let err = fitted.transform(&extra).unwrap_err();
        assert!(err.to_string().contains("Columns were not equal"));

        let reordered = people()
            .select(&["length".to_string(), "name".to_string(), "shoesize".to_string()])
            .unwrap();
        assert!(fitted.transform(&reordered).is_err());
    }

    #[test]
    fn test_transform_recomputes_selection() {
        let fitted = TypeSelector::new()
            .include(DTypeSpec::Number)
            .fit(&people())
            .unwrap();

        let other = DataFrame::from_series(vec![
            Series::from_strs("name", &["Kim"]),
            Series::from_f64("length", vec![1.7]),
            Series::from_i64("shoesize", vec![39]),
        ])
        .unwrap();
        let out = fitted.transform(&other).unwrap();
        let recomputed = other.select_dtypes(&[DTypeSpec::Number], &[]);
        assert_eq!(out.column_names(), recomputed.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(out.column_names(), fitted.feature_names().iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_params_round_trip() {
        let fitted = TypeSelector::new()
            .exclude(DTypeSpec::Object)
            .fit(&people())
            .unwrap();
        let restored = FittedTypeSelector::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored, fitted);
        assert_eq!(restored.dtypes()[2], ("shoesize".to_string(), DType::Int64));
    }

    #[test]
    fn test_params_bytes_are_tagged() {
        let fitted = TypeSelector::new()
            .include(DTypeSpec::Number)
            .fit(&people())
            .unwrap();
        let bytes = fitted.extract_params().to_bytes().unwrap();
        assert_eq!(TypeSelectorParams::from_bytes(&bytes).unwrap(), fitted.extract_params());
        assert!(crate::preprocessing::ColumnSelectorParams::from_bytes(&bytes).is_err());
    }
}
