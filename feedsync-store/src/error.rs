//! Error types for the store layer.

use thiserror::Error;

/// Result type for store intents.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned synchronously by store intents.
///
/// Remote failures never show up here: they are recorded in the owning
/// collection's state instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller named a reaction that does not exist.
    #[error("invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    /// An insert-only table write hit an existing id.
    #[error(transparent)]
    Table(#[from] feedsync_table::TableError),
}

/// Errors produced while talking to the remote source.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// The remote answered with a failure status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The remote answered with JSON that does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Timeout.
    #[error("operation timed out")]
    Timeout,
}
