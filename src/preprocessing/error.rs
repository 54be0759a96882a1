//! Error types for preprocessing operations.

use crate::table::TableError;
use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// Input container is not the representation the transformer requires.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    /// Referenced columns are absent from the input.
    #[error("{missing:?} column(s) not in DataFrame")]
    ColumnMissing {
        /// Every missing name, once, in the order first referenced.
        missing: Vec<String>,
    },
    /// The selection or drop would leave no columns.
    #[error("Empty result: {0}")]
    EmptyResult(String),
    /// Input data has an unsupported format (complex values, sparse storage).
    #[error("Data format error: {0}")]
    DataFormat(String),
    /// Group columns could not be partitioned out of the input.
    #[error("Could not drop requested group columns {groups} from columns of input")]
    GroupSplit {
        /// The group specification as given by the caller.
        groups: String,
    },
    /// Shape, finiteness, or missing-value check failed.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Column dtypes changed between fit and transform.
    #[error("Dtype mismatch: {0}")]
    DTypeMismatch(String),
    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failure reported by the underlying table, passed through as is.
    #[error(transparent)]
    Table(#[from] TableError),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_column_missing() {
        let err = PreprocessingError::ColumnMissing {
            missing: vec!["weight".to_string()],
        };
        assert_eq!(err.to_string(), "[\"weight\"] column(s) not in DataFrame");
    }

    #[test]
    fn test_error_display_group_split() {
        let err = PreprocessingError::GroupSplit {
            groups: "[\"g\"]".to_string(),
        };
        assert!(err
            .to_string()
            .contains("Could not drop requested group columns"));
    }

    #[test]
    fn test_error_display_empty_result() {
        let err = PreprocessingError::EmptyResult("nothing left".to_string());
        assert!(err.to_string().contains("Empty result"));
    }

    #[test]
    fn test_error_display_data_format() {
        let err = PreprocessingError::DataFormat("complex".to_string());
        assert!(err.to_string().contains("Data format error"));
    }

    #[test]
    fn test_error_display_validation() {
        let err = PreprocessingError::Validation("Input contains NaN".to_string());
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_table_error_is_transparent() {
        let err: PreprocessingError = TableError::ColumnNotFound("x".to_string()).into();
        assert_eq!(err.to_string(), "column not found: x");
        assert!(matches!(err, PreprocessingError::Table(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::InvalidParameter("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
