//! Crate-level error type.
//!
//! Only configuration and catalog/connectivity failures are errors. Structural
//! problems in the catalog (dangling foreign keys, name clashes, unknown
//! types) are handled inside the schema stages and never surface here.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::{ConnectionError, SettingsError};
use crate::worker::WorkerError;

/// Result type for extraction.
pub type IntrospectResult<T> = Result<T, IntrospectError>;

#[derive(Error, Debug)]
pub enum IntrospectError {
    /// Invalid connection configuration, raised before any I/O.
    #[error("configuration error: {0}")]
    Config(#[from] ConnectionError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A catalog query failed or returned rows that could not be decoded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The worker could not be started.
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

impl IntrospectError {
    /// Whether the failure happened before any database I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Settings(_) | Self::Worker(WorkerError::Settings(_))
        )
    }
}
