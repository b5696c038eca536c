//! Table write operations under a fixed sort policy.
//!
//! Every operation is a pure function from a table to a table. A call that
//! changes nothing hands back the input `Arc`; a call that changes one entity
//! allocates exactly one new entity `Arc` and one new table `Arc`.

use feedsync_model::{Dated, Entity};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::{EntityTable, TableError, TableResult};

/// Ordering injected into an [`EntityAdapter`].
///
/// The adapter always breaks ties by ascending id, so the effective order is
/// total and independent of insertion sequence.
pub struct SortComparer<T>(Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>);

impl<T> SortComparer<T> {
    pub fn new(compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(compare))
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<T: Dated> SortComparer<T> {
    /// Newest first by `date`.
    #[must_use]
    pub fn newest_first() -> Self {
        Self::new(|a: &T, b: &T| b.date().cmp(a.date()))
    }
}

impl<T> Clone for SortComparer<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Produces CRUD and upsert operations over an [`EntityTable`].
pub struct EntityAdapter<T: Entity> {
    sort: Option<SortComparer<T>>,
}

impl<T: Entity> EntityAdapter<T> {
    /// Adapter that keeps ids in insertion order.
    #[must_use]
    pub fn unsorted() -> Self {
        Self { sort: None }
    }

    /// Adapter that keeps ids ordered by `sort`, ties by ascending id.
    #[must_use]
    pub fn sorted(sort: SortComparer<T>) -> Self {
        Self { sort: Some(sort) }
    }

    /// Returns true if this adapter maintains a comparator order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sort.is_some()
    }

    /// An empty table for this adapter.
    #[must_use]
    pub fn initial_state(&self) -> Arc<EntityTable<T>> {
        EntityTable::empty()
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Inserts the entity, or merges it into the stored one with the same id.
    #[must_use]
    pub fn upsert_one(&self, table: &Arc<EntityTable<T>>, entity: T) -> Arc<EntityTable<T>> {
        self.upsert_many(table, std::iter::once(entity))
    }

    /// Applies [`upsert_one`](Self::upsert_one) for each entity in turn.
    #[must_use]
    pub fn upsert_many(
        &self,
        table: &Arc<EntityTable<T>>,
        entities: impl IntoIterator<Item = T>,
    ) -> Arc<EntityTable<T>> {
        let mut next = (**table).clone();
        let mut changed = false;
        for entity in entities {
            changed |= self.write_upsert(&mut next, entity);
        }
        finish(table, next, changed)
    }

    /// Inserts the entity; fails with [`TableError::Conflict`] if the id is taken.
    pub fn add_one(&self, table: &Arc<EntityTable<T>>, entity: T) -> TableResult<Arc<EntityTable<T>>> {
        if table.contains(entity.id()) {
            return Err(TableError::Conflict(entity.id().to_string()));
        }
        Ok(self.upsert_one(table, entity))
    }

    /// Inserts every entity whose id is not yet present; others are skipped.
    #[must_use]
    pub fn add_many(
        &self,
        table: &Arc<EntityTable<T>>,
        entities: impl IntoIterator<Item = T>,
    ) -> Arc<EntityTable<T>> {
        let mut next = (**table).clone();
        let mut changed = false;
        for entity in entities {
            if !next.contains(entity.id()) {
                changed |= self.write_upsert(&mut next, entity);
            }
        }
        finish(table, next, changed)
    }

    /// Replaces the whole table content.
    #[must_use]
    pub fn set_all(
        &self,
        table: &Arc<EntityTable<T>>,
        entities: impl IntoIterator<Item = T>,
    ) -> Arc<EntityTable<T>> {
        let next = self.upsert_many(&EntityTable::empty(), entities);
        if *next == **table {
            Arc::clone(table)
        } else {
            next
        }
    }

    /// Replaces the entity with `id` by `f(existing)`. Missing id is a no-op.
    ///
    /// `f` must preserve the id.
    #[must_use]
    pub fn update_one(
        &self,
        table: &Arc<EntityTable<T>>,
        id: &T::Id,
        f: impl FnOnce(&T) -> T,
    ) -> Arc<EntityTable<T>> {
        let Some(existing) = table.entities.get(id).cloned() else {
            return Arc::clone(table);
        };
        let mut next = (**table).clone();
        let changed = self.write_replace(&mut next, &existing, f(&existing));
        finish(table, next, changed)
    }

    /// Applies `f` to every entity, keeping the instances it leaves equal.
    #[must_use]
    pub fn update_all(&self, table: &Arc<EntityTable<T>>, f: impl Fn(&T) -> T) -> Arc<EntityTable<T>> {
        let mut next = (**table).clone();
        let mut changed = false;
        for existing in table.select_all() {
            let updated = f(&existing);
            changed |= self.write_replace(&mut next, &existing, updated);
        }
        finish(table, next, changed)
    }

    /// Removes one entity. Missing id is a no-op.
    #[must_use]
    pub fn remove_one(&self, table: &Arc<EntityTable<T>>, id: &T::Id) -> Arc<EntityTable<T>> {
        let Some(existing) = table.entities.get(id).cloned() else {
            return Arc::clone(table);
        };
        let mut next = (**table).clone();
        self.detach(&mut next, &existing);
        Arc::new(next)
    }

    /// Empties the table.
    #[must_use]
    pub fn remove_all(&self, table: &Arc<EntityTable<T>>) -> Arc<EntityTable<T>> {
        if table.is_empty() {
            Arc::clone(table)
        } else {
            EntityTable::empty()
        }
    }

    // ── Internals ────────────────────────────────────────────────

    fn write_upsert(&self, table: &mut EntityTable<T>, entity: T) -> bool {
        match table.entities.get(entity.id()).cloned() {
            Some(existing) => {
                let merged = existing.merge(entity);
                self.write_replace(table, &existing, merged)
            }
            None => {
                self.attach(table, Arc::new(entity));
                true
            }
        }
    }

    fn write_replace(&self, table: &mut EntityTable<T>, existing: &Arc<T>, updated: T) -> bool {
        debug_assert_eq!(existing.id(), updated.id(), "update must preserve the id");
        if updated == **existing {
            return false;
        }
        let updated = Arc::new(updated);
        match self.sort {
            Some(_) => {
                self.detach(table, existing);
                self.attach(table, updated);
            }
            None => {
                table.entities.insert(updated.id().clone(), updated);
            }
        }
        true
    }

    /// Inserts an entity whose id is not in the table.
    fn attach(&self, table: &mut EntityTable<T>, entity: Arc<T>) {
        let id = entity.id().clone();
        match self.sort {
            Some(_) => {
                let index = match self.search(table, &entity) {
                    Ok(index) | Err(index) => index,
                };
                table.ids.insert(index, id.clone());
            }
            None => table.ids.push_back(id.clone()),
        }
        table.entities.insert(id, entity);
    }

    /// Removes the stored entity and its position in the id order.
    fn detach(&self, table: &mut EntityTable<T>, existing: &Arc<T>) {
        let index = match self.sort {
            Some(_) => self.search(table, existing).ok(),
            None => None,
        }
        .or_else(|| table.ids.index_of(existing.id()));
        if let Some(index) = index {
            table.ids.remove(index);
        }
        table.entities.remove(existing.id());
    }

    fn search(&self, table: &EntityTable<T>, target: &T) -> Result<usize, usize> {
        table.ids.binary_search_by(|probe| match table.entities.get(probe) {
            Some(probe) => self.compare(probe, target),
            None => probe.cmp(target.id()),
        })
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        let primary = match &self.sort {
            Some(sort) => sort.compare(a, b),
            None => Ordering::Equal,
        };
        primary.then_with(|| a.id().cmp(b.id()))
    }
}

impl<T: Entity> Clone for EntityAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            sort: self.sort.clone(),
        }
    }
}

impl<T: Entity> fmt::Debug for EntityAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("sorted", &self.is_sorted())
            .finish()
    }
}

fn finish<T: Entity>(
    original: &Arc<EntityTable<T>>,
    next: EntityTable<T>,
    changed: bool,
) -> Arc<EntityTable<T>> {
    if changed {
        Arc::new(next)
    } else {
        Arc::clone(original)
    }
}
