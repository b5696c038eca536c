//! Remote source abstraction.
//!
//! The store treats the server as an opaque collaborator that answers
//! collection reads and post creation with JSON. Transports implement
//! [`RemoteSource`]; the [`mock`] module ships an in-memory one.

use crate::error::RemoteResult;
use async_trait::async_trait;
use std::fmt;

/// A server-owned collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Users,
    Notifications,
}

impl Collection {
    /// Collection name as used in request paths.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::Users => "users",
            Collection::Notifications => "notifications",
        }
    }

    /// Request path of the collection.
    pub fn path(&self) -> String {
        format!("/fakeApi/{}", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The remote source the store synchronizes with.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Reads a collection as a JSON array, optionally only entries newer
    /// than `since`. An empty `since` means "everything".
    async fn get(&self, collection: Collection, since: Option<String>) -> RemoteResult<serde_json::Value>;

    /// Creates an entry and returns the server's canonical copy.
    async fn post(&self, collection: Collection, body: serde_json::Value) -> RemoteResult<serde_json::Value>;
}

/// An in-memory remote for testing.
pub mod mock {
    use super::*;
    use crate::error::RemoteError;
    use feedsync_model::{NewPost, Notification, Post, Reactions, User};
    use feedsync_types::{PostId, Timestamp};
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    /// One call received by [`FakeApi`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RecordedCall {
        Get {
            collection: Collection,
            since: Option<String>,
        },
        Post {
            collection: Collection,
            body: Value,
        },
    }

    /// Releases a call held by [`FakeApi::hold_next`].
    #[derive(Debug)]
    pub struct Release(oneshot::Sender<()>);

    impl Release {
        /// Lets the held call answer.
        pub fn release(self) {
            let _ = self.0.send(());
        }
    }

    #[derive(Default)]
    struct FakeState {
        posts: Vec<Post>,
        users: Vec<User>,
        notifications: Vec<Notification>,
        next_post_id: u64,
        failures: HashMap<Collection, VecDeque<String>>,
        holds: HashMap<Collection, VecDeque<oneshot::Receiver<()>>>,
        calls: Vec<RecordedCall>,
    }

    /// An in-memory fake of the remote API.
    ///
    /// Server ids are `server-<n>`; server dates are the time of creation.
    /// Reads filter on `date > since` using string comparison.
    #[derive(Clone)]
    pub struct FakeApi {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeApi {
        /// Creates an empty fake.
        pub fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeState {
                    next_post_id: 1,
                    ..FakeState::default()
                })),
            }
        }

        /// Sets the number used for the next server-assigned post id.
        pub fn with_next_post_id(self, next: u64) -> Self {
            self.state.lock().unwrap().next_post_id = next;
            self
        }

        /// Adds posts to the server.
        pub fn seed_posts(&self, posts: impl IntoIterator<Item = Post>) {
            self.state.lock().unwrap().posts.extend(posts);
        }

        /// Adds users to the server.
        pub fn seed_users(&self, users: impl IntoIterator<Item = User>) {
            self.state.lock().unwrap().users.extend(users);
        }

        /// Adds notifications to the server.
        pub fn seed_notifications(&self, notifications: impl IntoIterator<Item = Notification>) {
            self.state.lock().unwrap().notifications.extend(notifications);
        }

        /// Makes the next call on `collection` fail with a network error.
        pub fn fail_next(&self, collection: Collection, message: impl Into<String>) {
            self.state
                .lock()
                .unwrap()
                .failures
                .entry(collection)
                .or_default()
                .push_back(message.into());
        }

        /// Makes the next call on `collection` wait until released.
        ///
        /// The response is computed when the call arrives, before waiting.
        pub fn hold_next(&self, collection: Collection) -> Release {
            let (tx, rx) = oneshot::channel();
            self.state
                .lock()
                .unwrap()
                .holds
                .entry(collection)
                .or_default()
                .push_back(rx);
            Release(tx)
        }

        /// Calls received so far.
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.state.lock().unwrap().calls.clone()
        }

        fn answer_get(state: &FakeState, collection: Collection, since: &str) -> RemoteResult<Value> {
            let newer = |date: &Timestamp| since.is_empty() || date.as_str() > since;
            let value = match collection {
                Collection::Posts => serde_json::to_value(
                    state.posts.iter().filter(|p| newer(&p.date)).collect::<Vec<_>>(),
                )?,
                Collection::Users => serde_json::to_value(&state.users)?,
                Collection::Notifications => serde_json::to_value(
                    state
                        .notifications
                        .iter()
                        .filter(|n| newer(&n.date))
                        .collect::<Vec<_>>(),
                )?,
            };
            Ok(value)
        }

        fn answer_post(state: &mut FakeState, collection: Collection, body: Value) -> RemoteResult<Value> {
            if collection != Collection::Posts {
                return Err(RemoteError::Status {
                    status: 405,
                    message: format!("cannot create {collection}"),
                });
            }
            let new_post: NewPost = serde_json::from_value(body).map_err(|e| RemoteError::Status {
                status: 400,
                message: e.to_string(),
            })?;
            let post = Post {
                id: PostId::new(format!("server-{}", state.next_post_id)),
                title: new_post.title,
                content: new_post.content,
                author_id: new_post.author_id,
                date: Timestamp::now(),
                reactions: Reactions::default(),
            };
            state.next_post_id += 1;
            state.posts.push(post.clone());
            Ok(serde_json::to_value(post)?)
        }

        /// Records the call, then takes its scripted failure and hold, if any.
        fn begin(
            &self,
            collection: Collection,
            call: RecordedCall,
        ) -> (Option<String>, Option<oneshot::Receiver<()>>) {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            let failure = state.failures.get_mut(&collection).and_then(VecDeque::pop_front);
            let hold = state.holds.get_mut(&collection).and_then(VecDeque::pop_front);
            (failure, hold)
        }
    }

    impl Default for FakeApi {
        fn default() -> Self {
            Self::new()
        }
    }

    async fn wait(hold: Option<oneshot::Receiver<()>>) {
        if let Some(hold) = hold {
            let _ = hold.await;
        }
    }

    #[async_trait]
    impl RemoteSource for FakeApi {
        async fn get(&self, collection: Collection, since: Option<String>) -> RemoteResult<Value> {
            let (failure, hold) = self.begin(
                collection,
                RecordedCall::Get {
                    collection,
                    since: since.clone(),
                },
            );
            let answer = match failure {
                Some(message) => Err(RemoteError::Network(message)),
                None => {
                    let state = self.state.lock().unwrap();
                    Self::answer_get(&state, collection, since.as_deref().unwrap_or(""))
                }
            };
            wait(hold).await;
            answer
        }

        async fn post(&self, collection: Collection, body: Value) -> RemoteResult<Value> {
            let (failure, hold) = self.begin(
                collection,
                RecordedCall::Post {
                    collection,
                    body: body.clone(),
                },
            );
            let answer = match failure {
                Some(message) => Err(RemoteError::Network(message)),
                None => {
                    let mut state = self.state.lock().unwrap();
                    Self::answer_post(&mut state, collection, body)
                }
            };
            wait(hold).await;
            answer
        }
    }
}
