//! Error types for the sales cleaning pipeline.
//!
//! Uses `thiserror` for a small, classified error hierarchy. Loader and writer
//! failures carry the offending path; per-value coercion failures are never
//! errors (they flow through the null channel of the owning stage).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Input path does not exist.
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// Input exists but could not be read or parsed as CSV.
    #[error("Failed to load '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Output could not be persisted.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Two distinct raw headers normalized to the same column name.
    #[error("Column name collision after normalization: {0}")]
    DuplicateColumn(String),

    /// The loaded dataset has no rows; the pipeline halts rather than
    /// producing an empty output file.
    #[error("Input dataset is empty")]
    EmptyDataset,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check whether this error means the input file was absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let err = CleaningError::NotFound(PathBuf::from("missing.csv"));
        assert!(err.is_not_found());
        assert!(!CleaningError::EmptyDataset.is_not_found());
    }

    #[test]
    fn test_is_not_found_through_context() {
        let err = CleaningError::NotFound(PathBuf::from("missing.csv"))
            .with_context("While loading input");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("While loading input"));
    }

    #[test]
    fn test_duplicate_column_display() {
        let err = CleaningError::DuplicateColumn(
            "'Price' and ' price ' both normalize to 'price'".to_string(),
        );
        assert!(err.to_string().contains("collision"));
        assert!(err.to_string().contains("price"));
    }
}
