//! Core type definitions for feedsync.
//!
//! This crate defines the small, collection-agnostic types shared by the
//! rest of the workspace:
//! - Identifier newtypes for posts, users, notifications and in-flight requests
//! - ISO-8601 timestamps compared the way the remote source orders them
//! - The closed set of reaction kinds a post can receive

mod ids;
mod reaction;
mod timestamp;

pub use ids::{NotificationId, PostId, RequestId, UserId};
pub use reaction::ReactionKind;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid reaction kind: {0}")]
    InvalidReactionKind(String),
}
