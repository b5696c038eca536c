//! Per-collection state and reducers.
//!
//! Each slice exclusively owns one entity table. Reducers are synchronous
//! and replace the table `Arc` only when a value actually changes.

pub mod notifications;
pub mod posts;
mod status;
pub mod users;

pub use notifications::NotificationsState;
pub use posts::PostsState;
pub use status::SyncStatus;
pub use users::UsersState;
