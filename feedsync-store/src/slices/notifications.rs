//! Notifications: ingested incrementally, marked read in bulk.
//!
//! `is_new` is re-derived from `read` for the whole table after every
//! successful ingestion, and only then. Marking everything read therefore
//! leaves `is_new` untouched until the next fetch cycle.

use crate::action::NotificationsAction;
use crate::operation::Phase;
use feedsync_model::Notification;
use feedsync_table::{EntityAdapter, EntityTable, SortComparer};
use feedsync_types::NotificationId;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static ADAPTER: LazyLock<EntityAdapter<Notification>> =
    LazyLock::new(|| EntityAdapter::sorted(SortComparer::newest_first()));

/// Table adapter for notifications: newest first, ties by id.
pub fn adapter() -> &'static EntityAdapter<Notification> {
    &ADAPTER
}

/// State of the notifications collection.
#[derive(Debug, Clone)]
pub struct NotificationsState {
    pub entities: Arc<EntityTable<Notification>>,
}

impl Default for NotificationsState {
    fn default() -> Self {
        Self {
            entities: adapter().initial_state(),
        }
    }
}

impl NotificationsState {
    /// Date of the newest known notification, or an empty string.
    pub fn latest_date(&self) -> String {
        self.entities
            .first()
            .map(|n| n.date.as_str().to_string())
            .unwrap_or_default()
    }

    /// Applies one notifications transition.
    pub fn reduce(&mut self, action: NotificationsAction) {
        match action {
            NotificationsAction::FetchNotifications(event) => match event.phase {
                Phase::Pending => {}
                Phase::Fulfilled(batch) => {
                    debug!("ingesting {} notifications", batch.len());
                    let merged = adapter().upsert_many(&self.entities, batch);
                    self.entities = adapter().update_all(&merged, Notification::with_recomputed_is_new);
                }
                Phase::Rejected(message) => warn!("notifications fetch failed: {}", message),
            },
            NotificationsAction::AllNotificationsRead => {
                self.entities = adapter().update_all(&self.entities, Notification::marked_read);
            }
        }
    }

    /// Looks up a notification by id.
    pub fn get(&self, id: &NotificationId) -> Option<Arc<Notification>> {
        self.entities.select_by_id(id)
    }
}
