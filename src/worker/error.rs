//! Worker-specific error types.

use std::io;
use thiserror::Error;

use crate::config::SettingsError;

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors raised while talking to the database worker.
///
/// These reach the caller of an extraction unchanged.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// No worker binary was configured or found.
    #[error("database worker not found; set worker.path in introspect.toml")]
    NotFound,

    /// The `[worker]` settings could not be resolved.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Failed to spawn the worker process.
    #[error("failed to spawn worker process: {0}")]
    SpawnFailed(#[source] io::Error),

    /// The spawned process did not expose a piped stdin/stdout.
    #[error("worker {0} was not captured")]
    PipeUnavailable(&'static str),

    /// Failed to start the runtime that drives the worker.
    #[error("failed to start worker runtime: {0}")]
    Runtime(#[source] io::Error),

    /// Failed to write to worker stdin.
    #[error("failed to write to worker: {0}")]
    WriteFailed(#[source] io::Error),

    /// Failed to serialize request to JSON.
    #[error("failed to serialize request: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to deserialize response from JSON.
    #[error("failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// Request timed out waiting for response.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Response channel was closed before a response arrived.
    #[error("worker process exited unexpectedly")]
    ChannelClosed,

    /// Worker returned an error response.
    #[error("worker error: {message} (code: {code})")]
    Remote { code: String, message: String },

    /// Database driver not available in the worker.
    #[error("database driver not found: {0}")]
    DriverNotFound(String),

    /// Database connection failed.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The database rejected the query.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl WorkerError {
    /// Create a remote error from an error response.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Classify a worker error code into a specific variant.
    pub fn classify(code: &str, message: &str) -> Self {
        match code {
            "DRIVER_NOT_FOUND" => Self::DriverNotFound(message.to_string()),
            "CONNECTION_FAILED" => Self::ConnectionFailed(message.to_string()),
            "QUERY_FAILED" => Self::QueryFailed(message.to_string()),
            "INVALID_REQUEST" => Self::InvalidRequest(message.to_string()),
            "WORKER_EXITED" => Self::ChannelClosed,
            _ => Self::remote(code, message),
        }
    }

    /// Check if this error indicates the worker has exited.
    pub fn is_worker_exited(&self) -> bool {
        matches!(self, Self::ChannelClosed)
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for WorkerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}
