//! Memoized read-only views over [`RootState`].
//!
//! Each derived selector keeps a one-entry cache keyed by the identity of its
//! inputs. Tables are compared with `Arc::ptr_eq`, so a selector recomputes
//! only after a reducer actually replaced the table it reads. Plain lookups
//! (`*_by_id`, `*_ids`, status) read straight through.

use crate::slices::SyncStatus;
use crate::state::RootState;
use feedsync_model::{Entity, Notification, Post, User};
use feedsync_table::EntityTable;
use feedsync_types::{NotificationId, PostId, UserId};
use std::sync::Arc;

/// A selector output holding entities in table order.
pub type EntityList<T> = Arc<Vec<Arc<T>>>;

/// Input identity of a memoized selector.
pub trait MemoKey {
    /// Returns true if `self` and `other` are the same input.
    fn same_as(&self, other: &Self) -> bool;
}

impl<T: ?Sized> MemoKey for Arc<T> {
    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl MemoKey for UserId {
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1)
    }
}

/// One-entry cache of a selector result.
#[derive(Debug)]
struct Memo<K, V> {
    cached: Option<(K, V)>,
    recomputations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }
}

impl<K: MemoKey, V: Clone> Memo<K, V> {
    fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some((cached_key, value)) = &self.cached {
            if cached_key.same_as(&key) {
                return value.clone();
            }
        }
        let value = compute(&key);
        self.recomputations += 1;
        self.cached = Some((key, value.clone()));
        value
    }
}

/// How many times each memoized selector has recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recomputations {
    pub all_posts: usize,
    pub all_users: usize,
    pub all_notifications: usize,
    pub posts_by_author: usize,
    pub unread_notification_count: usize,
}

/// The selector layer. Owns only its caches; never touches state.
#[derive(Debug, Default)]
pub struct Selectors {
    all_posts: Memo<Arc<EntityTable<Post>>, EntityList<Post>>,
    all_users: Memo<Arc<EntityTable<User>>, EntityList<User>>,
    all_notifications: Memo<Arc<EntityTable<Notification>>, EntityList<Notification>>,
    posts_by_author: Memo<(EntityList<Post>, UserId), EntityList<Post>>,
    unread_notification_count: Memo<Arc<EntityTable<Notification>>, usize>,
}

fn all_of<T: Entity>(table: &Arc<EntityTable<T>>) -> EntityList<T> {
    Arc::new(table.select_all())
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Posts ────────────────────────────────────────────────────

    /// All posts, newest first.
    pub fn all_posts(&mut self, state: &RootState) -> EntityList<Post> {
        self.all_posts
            .get_or_compute(Arc::clone(&state.posts.entities), all_of)
    }

    pub fn post_by_id(&self, state: &RootState, id: &PostId) -> Option<Arc<Post>> {
        state.posts.entities.select_by_id(id)
    }

    pub fn post_ids(&self, state: &RootState) -> im::Vector<PostId> {
        state.posts.entities.select_ids().clone()
    }

    /// Posts written by `author_id`, newest first.
    ///
    /// Derived from [`all_posts`](Self::all_posts): recomputes only when that
    /// output or the author changes.
    pub fn posts_by_author(&mut self, state: &RootState, author_id: &UserId) -> EntityList<Post> {
        let posts = self.all_posts(state);
        self.posts_by_author
            .get_or_compute((posts, author_id.clone()), |(posts, author_id)| {
                Arc::new(
                    posts
                        .iter()
                        .filter(|p| &p.author_id == author_id)
                        .cloned()
                        .collect(),
                )
            })
    }

    pub fn posts_status(&self, state: &RootState) -> SyncStatus {
        state.posts.status
    }

    pub fn posts_error<'a>(&self, state: &'a RootState) -> Option<&'a str> {
        state.posts.error.as_deref()
    }

    // ── Users ────────────────────────────────────────────────────

    /// All users, in server order.
    pub fn all_users(&mut self, state: &RootState) -> EntityList<User> {
        self.all_users
            .get_or_compute(Arc::clone(&state.users.entities), all_of)
    }

    pub fn user_by_id(&self, state: &RootState, id: &UserId) -> Option<Arc<User>> {
        state.users.entities.select_by_id(id)
    }

    pub fn user_ids(&self, state: &RootState) -> im::Vector<UserId> {
        state.users.entities.select_ids().clone()
    }

    // ── Notifications ────────────────────────────────────────────

    /// All notifications, newest first.
    pub fn all_notifications(&mut self, state: &RootState) -> EntityList<Notification> {
        self.all_notifications
            .get_or_compute(Arc::clone(&state.notifications.entities), all_of)
    }

    pub fn notification_by_id(&self, state: &RootState, id: &NotificationId) -> Option<Arc<Notification>> {
        state.notifications.entities.select_by_id(id)
    }

    pub fn notification_ids(&self, state: &RootState) -> im::Vector<NotificationId> {
        state.notifications.entities.select_ids().clone()
    }

    pub fn unread_notification_count(&mut self, state: &RootState) -> usize {
        self.unread_notification_count
            .get_or_compute(Arc::clone(&state.notifications.entities), |table| {
                table.select_all().iter().filter(|n| !n.read).count()
            })
    }

    /// Date of the newest notification, or an empty string.
    pub fn latest_notification_date(&self, state: &RootState) -> String {
        state.notifications.latest_date()
    }

    /// Recomputation counters of every memoized selector.
    pub fn recomputations(&self) -> Recomputations {
        Recomputations {
            all_posts: self.all_posts.recomputations,
            all_users: self.all_users.recomputations,
            all_notifications: self.all_notifications.recomputations,
            posts_by_author: self.posts_by_author.recomputations,
            unread_notification_count: self.unread_notification_count.recomputations,
        }
    }
}
