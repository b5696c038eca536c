use feedsync_model::Entity;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A normalized collection: entities keyed by id plus an explicit id order.
///
/// The order is maintained by the [`EntityAdapter`](crate::EntityAdapter)
/// that writes the table; the table itself only offers reads.
pub struct EntityTable<T: Entity> {
    pub(crate) entities: im::HashMap<T::Id, Arc<T>>,
    pub(crate) ids: im::Vector<T::Id>,
}

impl<T: Entity> EntityTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: im::HashMap::new(),
            ids: im::Vector::new(),
        }
    }

    /// Creates an empty table already wrapped for sharing.
    #[must_use]
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All entities in table order.
    #[must_use]
    pub fn select_all(&self) -> Vec<Arc<T>> {
        self.ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect()
    }

    /// The ordered id sequence.
    #[must_use]
    pub fn select_ids(&self) -> &im::Vector<T::Id> {
        &self.ids
    }

    /// Looks up one entity. `None` is the "not found" marker.
    #[must_use]
    pub fn select_by_id(&self, id: &T::Id) -> Option<Arc<T>> {
        self.entities.get(id).cloned()
    }

    /// Number of entities.
    #[must_use]
    pub fn select_total(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the table holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if an entity with this id is present.
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.entities.contains_key(id)
    }

    /// First entity in table order.
    #[must_use]
    pub fn first(&self) -> Option<Arc<T>> {
        self.ids.front().and_then(|id| self.entities.get(id).cloned())
    }

    /// Checks that the id order is a permutation of the map keys.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.ids.len() != self.entities.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.ids.len());
        self.ids
            .iter()
            .all(|id| self.entities.contains_key(id) && seen.insert(id))
    }
}

impl<T: Entity> Default for EntityTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for EntityTable<T> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
            ids: self.ids.clone(),
        }
    }
}

impl<T: Entity> PartialEq for EntityTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
            && self
                .ids
                .iter()
                .all(|id| self.entities.get(id) == other.entities.get(id))
    }
}

impl<T: Entity> fmt::Debug for EntityTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.select_all()).finish()
    }
}
