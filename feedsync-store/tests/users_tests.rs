//! Tests for the users slice.

mod common;

use common::{make_store, make_user};
use feedsync_store::remote::mock::FakeApi;
use feedsync_store::{Collection, Selectors};
use feedsync_types::UserId;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn fetch_keeps_server_order() {
    let api = FakeApi::new();
    api.seed_users([
        make_user("u2", "Tianna Jenkins"),
        make_user("u1", "Kevin Grant"),
        make_user("u3", "Madison Price"),
    ]);
    let mut store = make_store(&api);
    let mut selectors = Selectors::new();

    let handle = store.fetch_users();
    store.settle(handle).await;

    let names: Vec<String> = selectors
        .all_users(store.state())
        .iter()
        .map(|u| u.name.clone())
        .collect();
    assert_eq!(names, vec!["Tianna Jenkins", "Kevin Grant", "Madison Price"]);
    let kevin = selectors.user_by_id(store.state(), &UserId::new("u1")).unwrap();
    assert_eq!(kevin.name, "Kevin Grant");
}

#[tokio::test]
async fn identical_refetch_keeps_table_identity() {
    let api = FakeApi::new();
    api.seed_users([make_user("u1", "Kevin Grant")]);
    let mut store = make_store(&api);
    let handle = store.fetch_users();
    store.settle(handle).await;
    let before = Arc::clone(&store.state().users.entities);

    let handle = store.fetch_users();
    store.settle(handle).await;

    assert!(Arc::ptr_eq(&before, &store.state().users.entities));
}

#[tokio::test]
async fn rejected_fetch_leaves_users_empty() {
    let api = FakeApi::new();
    api.seed_users([make_user("u1", "Kevin Grant")]);
    api.fail_next(Collection::Users, "offline");
    let mut store = make_store(&api);

    let handle = store.fetch_users();
    store.settle(handle).await;

    assert!(store.state().users.entities.is_empty());
}
