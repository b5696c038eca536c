//! Domain records for feedsync.
//!
//! Defines the records every other feedsync crate works with:
//! - [`Entity`]: the contract a record fulfils to live in an entity table
//! - [`Post`], [`User`], [`Notification`]: the three server-owned collections
//! - [`Reactions`]: per-post reaction counters
//!
//! Records (de)serialize with the camelCase field names used by the remote
//! source.

mod entity;
mod notification;
mod post;
mod user;

pub use entity::{Dated, Entity};
pub use notification::Notification;
pub use post::{NewPost, Post, Reactions};
pub use user::User;
