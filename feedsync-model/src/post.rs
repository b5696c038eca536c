use feedsync_types::{PostId, ReactionKind, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Dated, Entity};

/// Reaction counters of a post, one per [`ReactionKind`].
///
/// Only kinds that were reported or incremented are stored; every other kind
/// reads as zero. Two values are equal when every kind has the same count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ReactionKind, u32>", into = "BTreeMap<ReactionKind, u32>")]
pub struct Reactions(BTreeMap<ReactionKind, u32>);

impl Reactions {
    /// Returns the count for one reaction kind.
    #[must_use]
    pub fn get(&self, kind: ReactionKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Returns a copy with `kind` incremented by one.
    #[must_use]
    pub fn incremented(&self, kind: ReactionKind) -> Self {
        let mut counts = self.0.clone();
        let count = counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
        Self(counts)
    }

    /// Returns a copy where the kinds reported in `incoming` take its counts
    /// and every other kind keeps this value's count.
    #[must_use]
    pub fn overlaid(&self, incoming: &Reactions) -> Self {
        let mut counts = self.0.clone();
        counts.extend(incoming.0.iter().map(|(k, v)| (*k, *v)));
        Self(counts)
    }

    /// Iterates `(kind, count)` pairs for every kind, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u32)> + '_ {
        ReactionKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Sum of all counters.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().map(|v| u64::from(*v)).sum()
    }
}

impl PartialEq for Reactions {
    fn eq(&self, other: &Self) -> bool {
        ReactionKind::ALL.into_iter().all(|k| self.get(k) == other.get(k))
    }
}

impl Eq for Reactions {}

impl From<BTreeMap<ReactionKind, u32>> for Reactions {
    fn from(counts: BTreeMap<ReactionKind, u32>) -> Self {
        Self(counts)
    }
}

impl From<Reactions> for BTreeMap<ReactionKind, u32> {
    fn from(reactions: Reactions) -> Self {
        reactions.iter().collect()
    }
}

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(alias = "user")]
    pub author_id: UserId,
    pub date: Timestamp,
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// Builds a post entirely on the client: fresh id, current time, no reactions.
    #[must_use]
    pub fn draft(title: impl Into<String>, content: impl Into<String>, author_id: UserId) -> Self {
        Self {
            id: PostId::generate(),
            title: title.into(),
            content: content.into(),
            author_id,
            date: Timestamp::now(),
            reactions: Reactions::default(),
        }
    }

    /// Returns a copy with a new title and content; everything else is kept.
    #[must_use]
    pub fn edited(&self, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with one more `kind` reaction.
    #[must_use]
    pub fn reacted(&self, kind: ReactionKind) -> Self {
        Self {
            reactions: self.reactions.incremented(kind),
            ..self.clone()
        }
    }

    /// The create-request body for this post.
    #[must_use]
    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            author_id: self.author_id.clone(),
        }
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &PostId {
        &self.id
    }

    /// Incoming fields win, except that reaction kinds the incoming copy
    /// does not report keep their local counts.
    fn merge(&self, incoming: Self) -> Self {
        let reactions = self.reactions.overlaid(&incoming.reactions);
        Self { reactions, ..incoming }
    }
}

impl Dated for Post {
    fn date(&self) -> &Timestamp {
        &self.date
    }
}

/// Body of a create-post request. The server assigns id and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}
