//! Shared test helpers for store tests.

#![allow(dead_code)]

use feedsync_model::{Notification, Post, Reactions, User};
use feedsync_store::remote::mock::FakeApi;
use feedsync_store::{Store, StoreConfig};
use feedsync_types::{NotificationId, PostId, Timestamp, UserId};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test log writer once; `RUST_LOG=debug` shows store traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// ISO-8601 timestamp at midnight UTC of the given January day in 2024.
pub fn jan(day: u32) -> Timestamp {
    Timestamp::new_unchecked(format!("2024-01-{day:02}T00:00:00.000Z"))
}

pub fn make_post(id: &str, date: Timestamp, author: &str) -> Post {
    Post {
        id: PostId::new(id),
        title: format!("post {id}"),
        content: format!("content of {id}"),
        author_id: UserId::new(author),
        date,
        reactions: Reactions::default(),
    }
}

pub fn make_user(id: &str, name: &str) -> User {
    User::new(id, name)
}

pub fn make_notification(id: &str, date: Timestamp, read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        date,
        user_id: UserId::new("u1"),
        message: format!("notification {id}"),
        read,
        is_new: true,
    }
}

/// A store over a shared handle to `api`.
pub fn make_store(api: &FakeApi) -> Store<FakeApi> {
    make_store_with(api, StoreConfig::default())
}

pub fn make_store_with(api: &FakeApi, config: StoreConfig) -> Store<FakeApi> {
    init_tracing();
    Store::new(Arc::new(api.clone()), config)
}

pub fn post_ids(store: &Store<FakeApi>) -> Vec<String> {
    store
        .state()
        .posts
        .entities
        .select_ids()
        .iter()
        .map(|id| id.to_string())
        .collect()
}
