//! Posts: fetched in bulk, created locally, edited and reacted to.

use crate::action::{FetchSince, PostsAction, StagedPost};
use crate::operation::{Phase, PhaseEvent};
use crate::slices::SyncStatus;
use feedsync_model::Post;
use feedsync_table::{EntityAdapter, EntityTable, SortComparer};
use feedsync_types::{PostId, RequestId};
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static ADAPTER: LazyLock<EntityAdapter<Post>> =
    LazyLock::new(|| EntityAdapter::sorted(SortComparer::newest_first()));

/// Table adapter for posts: newest first, ties by id.
pub fn adapter() -> &'static EntityAdapter<Post> {
    &ADAPTER
}

/// State of the posts collection.
#[derive(Debug, Clone)]
pub struct PostsState {
    pub entities: Arc<EntityTable<Post>>,
    pub status: SyncStatus,
    /// Message of the last failed operation.
    pub error: Option<String>,
    /// Request id of the most recently issued fetch.
    pub latest_fetch: Option<RequestId>,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            entities: adapter().initial_state(),
            status: SyncStatus::Idle,
            error: None,
            latest_fetch: None,
        }
    }
}

impl PostsState {
    /// Applies one posts transition.
    pub fn reduce(&mut self, action: PostsAction) {
        match action {
            PostsAction::FetchPosts(event) => self.on_fetch(event),
            PostsAction::AddNewPost(event) => self.on_add_new(event),
            PostsAction::PostAdded(post) => self.on_post_added(post),
            PostsAction::PostUpdated { id, title, content } => {
                self.entities = adapter().update_one(&self.entities, &id, |p| p.edited(title, content));
            }
            PostsAction::ReactionAdded { post_id, reaction } => {
                self.entities = adapter().update_one(&self.entities, &post_id, |p| p.reacted(reaction));
            }
        }
    }

    fn on_fetch(&mut self, event: PhaseEvent<FetchSince, Vec<Post>>) {
        match event.phase {
            Phase::Pending => {
                self.status = SyncStatus::Loading;
                self.latest_fetch = Some(event.request_id);
            }
            Phase::Fulfilled(posts) => {
                if self.latest_fetch != Some(event.request_id) {
                    debug!("applying superseded posts fetch {}", event.request_id);
                }
                self.status = SyncStatus::Succeeded;
                self.entities = adapter().upsert_many(&self.entities, posts);
            }
            Phase::Rejected(message) => {
                self.status = SyncStatus::Failed;
                self.error = Some(message);
            }
        }
    }

    /// The staged copy is replaced by the server's canonical one, which wins
    /// over anything stored under the server id.
    fn on_add_new(&mut self, event: PhaseEvent<StagedPost, Post>) {
        let StagedPost { local_id } = event.arg;
        match event.phase {
            Phase::Pending => {}
            Phase::Fulfilled(server_post) => {
                debug!("reconciling staged post {} as {}", local_id, server_post.id);
                let without_staged = adapter().remove_one(&self.entities, &local_id);
                self.entities = adapter().upsert_one(&without_staged, server_post);
            }
            Phase::Rejected(message) => {
                self.entities = adapter().remove_one(&self.entities, &local_id);
                self.error = Some(message);
            }
        }
    }

    fn on_post_added(&mut self, post: Post) {
        match adapter().add_one(&self.entities, post) {
            Ok(entities) => self.entities = entities,
            Err(e) => warn!("ignoring staged post: {}", e),
        }
    }

    /// Looks up a post by id.
    pub fn get(&self, id: &PostId) -> Option<Arc<Post>> {
        self.entities.select_by_id(id)
    }
}
