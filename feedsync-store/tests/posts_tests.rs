//! Tests for the posts slice and its intents.

mod common;

use common::{jan, make_post, make_store, make_store_with, post_ids};
use feedsync_model::Post;
use feedsync_store::remote::mock::{FakeApi, RecordedCall};
use feedsync_store::{Collection, StoreConfig, StoreError, SyncStatus};
use feedsync_types::{PostId, ReactionKind};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn seeded_api() -> FakeApi {
    let api = FakeApi::new();
    api.seed_posts([make_post("1", jan(1), "u1"), make_post("2", jan(2), "u2")]);
    api
}

// ── fetch ───────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_orders_newest_first_and_succeeds() {
    let api = seeded_api();
    let mut store = make_store(&api);

    let handle = store.fetch_posts().expect("idle store issues the fetch");
    assert_eq!(store.state().posts.status, SyncStatus::Loading);

    store.settle(handle).await;

    assert_eq!(post_ids(&store), vec!["2", "1"]);
    assert_eq!(store.state().posts.status, SyncStatus::Succeeded);
    assert_eq!(store.state().posts.error, None);
}

#[tokio::test]
async fn pending_is_applied_before_the_call_runs() {
    let api = seeded_api();
    let mut store = make_store(&api);

    let handle = store.refresh_posts();

    assert_eq!(store.state().posts.status, SyncStatus::Loading);
    assert_eq!(store.state().posts.latest_fetch, Some(handle.request_id()));
    assert!(store.state().posts.entities.is_empty());
}

#[tokio::test]
async fn fetch_requests_the_whole_collection() {
    let api = seeded_api();
    let mut store = make_store(&api);

    let handle = store.refresh_posts();
    store.settle(handle).await;
    let handle = store.refresh_posts();
    store.settle(handle).await;

    let unfiltered = RecordedCall::Get {
        collection: Collection::Posts,
        since: None,
    };
    assert_eq!(api.calls(), vec![unfiltered.clone(), unfiltered]);
}

#[tokio::test]
async fn staged_post_does_not_hide_server_posts_from_fetch() {
    let api = seeded_api().with_next_post_id(7);
    let mut store = make_store(&api);

    let (_, add) = store.add_new_post("T", "C", "u1");
    let fetch = store.fetch_posts().expect("add does not touch the fetch status");
    store.settle(add).await;
    store.settle(fetch).await;

    let mut ids = post_ids(&store);
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "server-7"]);
    assert_eq!(store.state().posts.status, SyncStatus::Succeeded);
}

#[tokio::test]
async fn rejected_fetch_records_failure() {
    let api = seeded_api();
    api.fail_next(Collection::Posts, "server down");
    let mut store = make_store(&api);

    let handle = store.refresh_posts();
    store.settle(handle).await;

    assert_eq!(store.state().posts.status, SyncStatus::Failed);
    assert_eq!(store.state().posts.error.as_deref(), Some("network error: server down"));
    assert!(store.state().posts.entities.is_empty());
}

#[tokio::test]
async fn refresh_retries_after_failure() {
    let api = seeded_api();
    api.fail_next(Collection::Posts, "server down");
    let mut store = make_store(&api);
    let handle = store.fetch_posts().unwrap();
    store.settle(handle).await;
    assert_eq!(store.state().posts.status, SyncStatus::Failed);
    assert!(store.fetch_posts().is_none(), "failed must gate");

    let retry = store.refresh_posts();
    assert_eq!(store.state().posts.status, SyncStatus::Loading);
    store.settle(retry).await;

    assert_eq!(store.state().posts.status, SyncStatus::Succeeded);
    assert_eq!(post_ids(&store), vec!["2", "1"]);
}

#[tokio::test]
async fn fetch_is_gated_unless_idle() {
    let api = seeded_api();
    let mut store = make_store(&api);

    let first = store.fetch_posts();
    assert!(first.is_some());
    assert!(store.fetch_posts().is_none(), "loading must gate");

    store.settle(first.unwrap()).await;
    assert!(store.fetch_posts().is_none(), "succeeded must gate");

    let refresh = store.refresh_posts();
    assert_eq!(store.state().posts.status, SyncStatus::Loading);
    store.settle(refresh).await;
    assert_eq!(store.state().posts.status, SyncStatus::Succeeded);
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn gate_can_be_disabled() {
    let api = seeded_api();
    let mut store = make_store_with(
        &api,
        StoreConfig {
            gate_post_fetch_on_idle: false,
            ..StoreConfig::default()
        },
    );

    let first = store.fetch_posts().unwrap();
    let second = store.fetch_posts().unwrap();
    store.settle(first).await;
    store.settle(second).await;

    assert_eq!(api.calls().len(), 2);
    assert_eq!(post_ids(&store), vec!["2", "1"]);
}

#[tokio::test]
async fn refetch_merges_into_existing_table() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;

    api.seed_posts([make_post("3", jan(3), "u1")]);
    let handle = store.refresh_posts();
    store.settle(handle).await;

    assert_eq!(post_ids(&store), vec!["3", "2", "1"]);
}

// ── add_new_post ────────────────────────────────────────────────

#[tokio::test]
async fn add_new_post_stages_then_reconciles_with_server_copy() {
    let api = FakeApi::new().with_next_post_id(7);
    let mut store = make_store(&api);

    let (local_id, handle) = store.add_new_post("T", "C", "u1");

    let staged = store.state().posts.get(&local_id).expect("staged immediately");
    assert_eq!(staged.title, "T");
    assert_eq!(staged.content, "C");
    assert_eq!(staged.author_id.as_str(), "u1");
    assert_eq!(staged.reactions.total(), 0);

    store.settle(handle).await;

    assert_eq!(post_ids(&store), vec!["server-7"]);
    let saved = store.state().posts.get(&PostId::new("server-7")).unwrap();
    assert_eq!(saved.title, "T");
    assert_eq!(saved.author_id.as_str(), "u1");
    assert!(store.state().posts.get(&local_id).is_none());
}

#[tokio::test]
async fn add_new_post_sends_title_content_and_author() {
    let api = FakeApi::new();
    let mut store = make_store(&api);

    let (_, handle) = store.add_new_post("Hello", "World", "u9");
    store.settle(handle).await;

    assert_eq!(
        api.calls(),
        vec![RecordedCall::Post {
            collection: Collection::Posts,
            body: serde_json::json!({"title": "Hello", "content": "World", "authorId": "u9"}),
        }]
    );
}

#[tokio::test]
async fn rejected_add_rolls_back_and_keeps_status() {
    let api = FakeApi::new();
    api.fail_next(Collection::Posts, "unavailable");
    let mut store = make_store(&api);

    let (local_id, handle) = store.add_new_post("T", "C", "u1");
    assert!(store.state().posts.get(&local_id).is_some());

    store.settle(handle).await;

    assert!(store.state().posts.entities.is_empty());
    assert_eq!(store.state().posts.status, SyncStatus::Idle);
    assert_eq!(store.state().posts.error.as_deref(), Some("network error: unavailable"));
}

// ── update / react ──────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_title_and_content_only() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;

    store.update_post("1", "new title", "new content");

    let post = store.state().posts.get(&PostId::new("1")).unwrap();
    assert_eq!(post.title, "new title");
    assert_eq!(post.content, "new content");
    assert_eq!(post.date, jan(1));
    assert_eq!(post_ids(&store), vec!["2", "1"]);
}

#[tokio::test]
async fn react_twice_adds_two_to_that_counter_only() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;

    store.react("1", ReactionKind::Heart);
    store.react("1", ReactionKind::Heart);

    let post = store.state().posts.get(&PostId::new("1")).unwrap();
    for kind in ReactionKind::ALL {
        let expected = if kind == ReactionKind::Heart { 2 } else { 0 };
        assert_eq!(post.reactions.get(kind), expected, "{kind}");
    }
    let other = store.state().posts.get(&PostId::new("2")).unwrap();
    assert_eq!(other.reactions.total(), 0);
}

#[tokio::test]
async fn mutations_of_unknown_post_leave_table_identical() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;
    let before = Arc::clone(&store.state().posts.entities);

    store.react("missing", ReactionKind::Rocket);
    store.update_post("missing", "t", "c");

    assert!(Arc::ptr_eq(&before, &store.state().posts.entities));
}

#[tokio::test]
async fn react_str_parses_known_kinds() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;

    store.react_str("2", "thumbsUp").unwrap();

    let post = store.state().posts.get(&PostId::new("2")).unwrap();
    assert_eq!(post.reactions.get(ReactionKind::ThumbsUp), 1);
}

#[tokio::test]
async fn react_str_rejects_unknown_kind() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;
    let before = Arc::clone(&store.state().posts.entities);

    let err = store.react_str("1", "clap").unwrap_err();

    assert!(matches!(err, StoreError::InvalidReactionKind(ref kind) if kind == "clap"));
    assert!(Arc::ptr_eq(&before, &store.state().posts.entities));
}

// ── staged posts ────────────────────────────────────────────────

#[tokio::test]
async fn staging_an_existing_id_is_ignored() {
    let api = seeded_api();
    let mut store = make_store(&api);
    let handle = store.refresh_posts();
    store.settle(handle).await;
    let before = Arc::clone(&store.state().posts.entities);

    let mut duplicate: Post = make_post("1", jan(9), "u3");
    duplicate.title = "duplicate".into();
    store.dispatch(feedsync_store::PostsAction::PostAdded(duplicate));

    assert!(Arc::ptr_eq(&before, &store.state().posts.entities));
}
