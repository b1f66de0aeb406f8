//! Catalog error types.

use thiserror::Error;

use crate::worker::WorkerError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that abort a catalog read.
///
/// Any of these is fatal to the extraction call. Nothing here is retried.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport or database failure, passed through unmodified.
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// The query runner failed for a reason of its own.
    #[error("catalog query failed: {0}")]
    Query(String),

    /// A result row lacks a required field.
    #[error("catalog row is missing field `{0}`")]
    MissingField(String),

    /// A result field holds a value of the wrong shape.
    #[error("catalog field `{field}` has unexpected value {value}")]
    InvalidValue { field: String, value: String },

    /// Failed to read a catalog dump file.
    #[error("failed to read catalog dump: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a catalog dump file.
    #[error("failed to parse catalog dump: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn invalid_value(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
        }
    }
}
