use feedsync_types::{NotificationId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::{Dated, Entity};

fn default_is_new() -> bool {
    true
}

/// A notification delivered by the remote source.
///
/// `is_new` is a display hint derived from `read` once per fetch cycle; it
/// is not kept in lockstep with `read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub date: Timestamp,
    #[serde(alias = "user")]
    pub user_id: UserId,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
}

impl Notification {
    /// Returns a read copy; `is_new` is left alone.
    #[must_use]
    pub fn marked_read(&self) -> Self {
        Self {
            read: true,
            ..self.clone()
        }
    }

    /// Returns a copy whose `is_new` is re-derived from `read`.
    #[must_use]
    pub fn with_recomputed_is_new(&self) -> Self {
        Self {
            is_new: !self.read,
            ..self.clone()
        }
    }
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }

    /// `read` is sticky: a remote copy that has not seen a local
    /// "mark all read" does not un-read the notification. `is_new` keeps
    /// the local value until the next recompute pass.
    fn merge(&self, incoming: Self) -> Self {
        Self {
            read: self.read || incoming.read,
            is_new: self.is_new,
            ..incoming
        }
    }
}

impl Dated for Notification {
    fn date(&self) -> &Timestamp {
        &self.date
    }
}
