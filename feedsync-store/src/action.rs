//! The closed set of state transitions.
//!
//! Every change to store state is one of these variants; `Store::dispatch`
//! routes each variant to its collection reducer with a `match`.

use crate::operation::PhaseEvent;
use feedsync_model::{Notification, Post, User};
use feedsync_types::{PostId, ReactionKind};

/// Input of an incremental fetch, captured before the call suspends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchSince {
    /// Date of the newest entry known at issue time; empty if none.
    pub since: String,
}

/// Input of the create-post operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPost {
    /// Id of the locally staged copy to reconcile away on completion.
    pub local_id: PostId,
}

/// Transitions of the posts collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    FetchPosts(PhaseEvent<FetchSince, Vec<Post>>),
    AddNewPost(PhaseEvent<StagedPost, Post>),
    /// Stages a client-built post.
    PostAdded(Post),
    PostUpdated {
        id: PostId,
        title: String,
        content: String,
    },
    ReactionAdded {
        post_id: PostId,
        reaction: ReactionKind,
    },
}

/// Transitions of the users collection.
#[derive(Debug, Clone, PartialEq)]
pub enum UsersAction {
    FetchUsers(PhaseEvent<(), Vec<User>>),
}

/// Transitions of the notifications collection.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationsAction {
    FetchNotifications(PhaseEvent<FetchSince, Vec<Notification>>),
    AllNotificationsRead,
}

/// Any store transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Posts(PostsAction),
    Users(UsersAction),
    Notifications(NotificationsAction),
}

impl Action {
    /// Action type name as shown in logs, e.g. `posts/postUpdated`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Posts(PostsAction::FetchPosts(_)) => "posts/fetchPosts",
            Action::Posts(PostsAction::AddNewPost(_)) => "posts/addNewPost",
            Action::Posts(PostsAction::PostAdded(_)) => "posts/postAdded",
            Action::Posts(PostsAction::PostUpdated { .. }) => "posts/postUpdated",
            Action::Posts(PostsAction::ReactionAdded { .. }) => "posts/reactionAdded",
            Action::Users(UsersAction::FetchUsers(_)) => "users/fetchUsers",
            Action::Notifications(NotificationsAction::FetchNotifications(_)) => {
                "notifications/fetchNotifications"
            }
            Action::Notifications(NotificationsAction::AllNotificationsRead) => {
                "notifications/allNotificationsRead"
            }
        }
    }
}

impl From<PostsAction> for Action {
    fn from(action: PostsAction) -> Self {
        Action::Posts(action)
    }
}

impl From<UsersAction> for Action {
    fn from(action: UsersAction) -> Self {
        Action::Users(action)
    }
}

impl From<NotificationsAction> for Action {
    fn from(action: NotificationsAction) -> Self {
        Action::Notifications(action)
    }
}
