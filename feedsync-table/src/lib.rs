//! Normalized entity tables for feedsync.
//!
//! - [`EntityTable<T>`]: an id-keyed map of entities plus an explicit order of ids
//! - [`EntityAdapter<T>`]: CRUD/upsert operations over a table under a fixed sort policy
//! - [`SortComparer<T>`]: the injected ordering (ties are always broken by id)
//!
//! Tables are immutable values. Every adapter operation takes an
//! `Arc<EntityTable<T>>` and returns one: the very same `Arc` when nothing
//! changed, a new one otherwise. Entities are stored as `Arc<T>` inside
//! persistent collections, so a new table shares every untouched entity with
//! its predecessor. Identity comparison (`Arc::ptr_eq`) is therefore a correct
//! staleness check for anything derived from a table.

mod adapter;
mod table;

pub use adapter::{EntityAdapter, SortComparer};
pub use table::EntityTable;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur in table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// An insert-only operation targeted an id that is already present.
    #[error("entity already exists: {0}")]
    Conflict(String),
}
