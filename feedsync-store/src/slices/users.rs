//! Users: populated once, never mutated locally.

use crate::action::UsersAction;
use crate::operation::Phase;
use feedsync_model::User;
use feedsync_table::{EntityAdapter, EntityTable};
use feedsync_types::UserId;
use std::sync::{Arc, LazyLock};
use tracing::warn;

static ADAPTER: LazyLock<EntityAdapter<User>> = LazyLock::new(EntityAdapter::unsorted);

/// Table adapter for users: server order is kept.
pub fn adapter() -> &'static EntityAdapter<User> {
    &ADAPTER
}

/// State of the users collection.
#[derive(Debug, Clone)]
pub struct UsersState {
    pub entities: Arc<EntityTable<User>>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            entities: adapter().initial_state(),
        }
    }
}

impl UsersState {
    /// Applies one users transition.
    pub fn reduce(&mut self, action: UsersAction) {
        match action {
            UsersAction::FetchUsers(event) => match event.phase {
                Phase::Pending => {}
                Phase::Fulfilled(users) => {
                    self.entities = adapter().set_all(&self.entities, users);
                }
                Phase::Rejected(message) => warn!("users fetch failed: {}", message),
            },
        }
    }

    /// Looks up a user by id.
    pub fn get(&self, id: &UserId) -> Option<Arc<User>> {
        self.entities.select_by_id(id)
    }
}
