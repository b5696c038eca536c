use feedsync_types::Timestamp;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record that can be stored in an entity table.
///
/// Equality is used to detect no-op writes: when a merge produces a value
/// equal to the stored one, the table keeps the stored instance.
pub trait Entity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Primary key type.
    type Id: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;

    /// Returns the primary key.
    fn id(&self) -> &Self::Id;

    /// Merges an incoming copy of the same record into this one.
    ///
    /// Default implementation takes the incoming record wholesale.
    fn merge(&self, incoming: Self) -> Self {
        incoming
    }
}

/// A record that carries a creation date used for ordering.
pub trait Dated {
    fn date(&self) -> &Timestamp;
}
