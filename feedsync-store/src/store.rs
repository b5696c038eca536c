//! The store: owns all collection state and issues intents.
//!
//! The store is constructed explicitly and passed by reference to whoever
//! needs it. Synchronous intents apply immediately. Asynchronous intents
//! dispatch their `Pending` phase immediately, run the remote call on a tokio
//! task, and queue the settled phase; the store applies queued phases in
//! arrival order when [`Store::drain_completed`] or [`Store::next_completed`]
//! is called.

use crate::action::{Action, FetchSince, NotificationsAction, PostsAction, StagedPost, UsersAction};
use crate::config::StoreConfig;
use crate::error::{RemoteError, RemoteResult, StoreError, StoreResult};
use crate::operation::{Completions, OperationHandle, OperationKind, OperationTask};
use crate::remote::{Collection, RemoteSource};
use crate::slices::SyncStatus;
use crate::state::RootState;
use feedsync_model::{Notification, Post, User};
use feedsync_types::{PostId, ReactionKind, UserId};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Client-side state container synchronized with a [`RemoteSource`].
pub struct Store<R: RemoteSource> {
    state: RootState,
    remote: Arc<R>,
    config: StoreConfig,
    completions: Completions,
    completed: mpsc::UnboundedReceiver<Action>,
}

impl<R: RemoteSource + 'static> Store<R> {
    /// Creates a store with empty tables and `idle` statuses.
    pub fn new(remote: Arc<R>, config: StoreConfig) -> Self {
        let (completions, completed) = Completions::channel();
        Self {
            state: RootState::default(),
            remote,
            config,
            completions,
            completed,
        }
    }

    /// Current state.
    pub fn state(&self) -> &RootState {
        &self.state
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Applies one action synchronously.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        debug!("dispatch {}", action.type_name());
        self.state.reduce(action);
    }

    /// Applies every settled phase queued so far. Returns how many were applied.
    pub fn drain_completed(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.completed.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next settled phase and applies it.
    pub async fn next_completed(&mut self) -> bool {
        match self.completed.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Waits for an issued operation and applies everything queued meanwhile.
    pub async fn settle(&mut self, handle: OperationHandle) -> usize {
        handle.finished().await;
        self.drain_completed()
    }

    // ── Posts ────────────────────────────────────────────────────

    /// Fetches posts, but only while the posts status is `idle` (unless
    /// gating is disabled in the config). Returns `None` when gated.
    pub fn fetch_posts(&mut self) -> Option<OperationHandle> {
        if self.config.gate_post_fetch_on_idle && self.state.posts.status != SyncStatus::Idle {
            debug!("posts fetch skipped: status is {}", self.state.posts.status);
            return None;
        }
        Some(self.refresh_posts())
    }

    /// Fetches posts regardless of status.
    ///
    /// The whole collection is requested. The newest notification date known
    /// at issue time is captured as the task input. Local post dates never
    /// reach the request.
    pub fn refresh_posts(&mut self) -> OperationHandle {
        let task = OperationTask::new(
            OperationKind::FetchPosts,
            FetchSince {
                since: self.state.notifications.latest_date(),
            },
        );
        self.dispatch(PostsAction::FetchPosts(task.pending()));
        debug!("fetching posts (notifications known up to {:?})", task.arg().since);

        let remote = Arc::clone(&self.remote);
        let call = async move {
            let value = remote.get(Collection::Posts, None).await?;
            decode::<Vec<Post>>(value)
        };
        self.completions.spawn(task, self.config.request_timeout(), call, |event| {
            PostsAction::FetchPosts(event).into()
        })
    }

    /// Stages a client-built post immediately, then creates it remotely.
    ///
    /// Returns the id of the staged copy and the handle of the create call.
    pub fn add_new_post(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: impl Into<UserId>,
    ) -> (PostId, OperationHandle) {
        let staged = Post::draft(title, content, author_id.into());
        let local_id = staged.id.clone();
        let body = staged.to_new_post();
        self.dispatch(PostsAction::PostAdded(staged));

        let task = OperationTask::new(
            OperationKind::AddNewPost,
            StagedPost {
                local_id: local_id.clone(),
            },
        );
        self.dispatch(PostsAction::AddNewPost(task.pending()));
        info!("creating post {}", local_id);

        let remote = Arc::clone(&self.remote);
        let call = async move {
            let body = serde_json::to_value(body)?;
            let value = remote.post(Collection::Posts, body).await?;
            decode::<Post>(value)
        };
        let handle = self.completions.spawn(task, self.config.request_timeout(), call, |event| {
            PostsAction::AddNewPost(event).into()
        });
        (local_id, handle)
    }

    /// Replaces title and content of an existing post. Unknown ids are ignored.
    pub fn update_post(&mut self, id: impl Into<PostId>, title: impl Into<String>, content: impl Into<String>) {
        self.dispatch(PostsAction::PostUpdated {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        });
    }

    /// Adds one reaction to an existing post. Unknown ids are ignored.
    pub fn react(&mut self, post_id: impl Into<PostId>, reaction: ReactionKind) {
        self.dispatch(PostsAction::ReactionAdded {
            post_id: post_id.into(),
            reaction,
        });
    }

    /// Like [`react`](Self::react), with the reaction given by its wire name.
    ///
    /// Unknown names are rejected before anything is dispatched.
    pub fn react_str(&mut self, post_id: impl Into<PostId>, reaction: &str) -> StoreResult<()> {
        let reaction: ReactionKind = reaction
            .parse()
            .map_err(|_| StoreError::InvalidReactionKind(reaction.to_string()))?;
        self.react(post_id, reaction);
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────

    /// Fetches all users.
    pub fn fetch_users(&mut self) -> OperationHandle {
        let task = OperationTask::new(OperationKind::FetchUsers, ());
        self.dispatch(UsersAction::FetchUsers(task.pending()));

        let remote = Arc::clone(&self.remote);
        let call = async move {
            let value = remote.get(Collection::Users, None).await?;
            decode::<Vec<User>>(value)
        };
        self.completions.spawn(task, self.config.request_timeout(), call, |event| {
            UsersAction::FetchUsers(event).into()
        })
    }

    // ── Notifications ────────────────────────────────────────────

    /// Fetches notifications newer than the newest one known right now.
    pub fn fetch_notifications(&mut self) -> OperationHandle {
        let task = OperationTask::new(
            OperationKind::FetchNotifications,
            FetchSince {
                since: self.state.notifications.latest_date(),
            },
        );
        self.dispatch(NotificationsAction::FetchNotifications(task.pending()));

        let remote = Arc::clone(&self.remote);
        let since = task.arg().since.clone();
        let call = async move {
            let value = remote.get(Collection::Notifications, Some(since)).await?;
            decode::<Vec<Notification>>(value)
        };
        self.completions.spawn(task, self.config.request_timeout(), call, |event| {
            NotificationsAction::FetchNotifications(event).into()
        })
    }

    /// Marks every notification read. `is_new` is left for the next fetch.
    pub fn mark_all_notifications_read(&mut self) {
        self.dispatch(NotificationsAction::AllNotificationsRead);
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> RemoteResult<T> {
    serde_json::from_value(value).map_err(RemoteError::from)
}
