use feedsync_types::{NotificationId, PostId, RequestId, UserId};
use std::collections::HashSet;
use std::str::FromStr;

// ── String ids ───────────────────────────────────────────────────

#[test]
fn post_id_wraps_server_id() {
    let id = PostId::new("server-7");
    assert_eq!(id.as_str(), "server-7");
    assert_eq!(id.to_string(), "server-7");
}

#[test]
fn post_id_generate_is_unique() {
    let ids: HashSet<PostId> = (0..100).map(|_| PostId::generate()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn generated_ids_parse_as_uuid() {
    let id = UserId::generate();
    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}

#[test]
fn from_str_accepts_any_text() {
    let id = NotificationId::from_str("n-1").unwrap();
    assert_eq!(id, NotificationId::from("n-1"));
}

#[test]
fn ids_order_lexicographically() {
    let mut ids = vec![PostId::new("b"), PostId::new("a"), PostId::new("c")];
    ids.sort();
    assert_eq!(ids, vec![PostId::new("a"), PostId::new("b"), PostId::new("c")]);
}

#[test]
fn string_id_serializes_transparently() {
    let id = UserId::new("u1");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"u1\"");
    let back: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

// ── RequestId ────────────────────────────────────────────────────

#[test]
fn request_id_new_is_unique() {
    assert_ne!(RequestId::new(), RequestId::new());
}

#[test]
fn request_id_display_is_uuid() {
    let id = RequestId::new();
    assert_eq!(id.to_string(), id.as_uuid().to_string());
}
