use crate::action::Action;
use crate::slices::{NotificationsState, PostsState, UsersState};

/// The whole store state: one slice per collection.
#[derive(Debug, Clone, Default)]
pub struct RootState {
    pub posts: PostsState,
    pub users: UsersState,
    pub notifications: NotificationsState,
}

impl RootState {
    /// Routes an action to the slice that owns it.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Posts(action) => self.posts.reduce(action),
            Action::Users(action) => self.users.reduce(action),
            Action::Notifications(action) => self.notifications.reduce(action),
        }
    }
}
