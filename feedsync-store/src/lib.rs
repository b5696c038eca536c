//! Client-side state store for feedsync.
//!
//! Holds normalized copies of the server's posts, users and notifications,
//! keeps them synchronized through asynchronous operations, and exposes
//! memoized views.
//!
//! # Architecture
//!
//! - **Operation**: remote calls as explicit tasks with a
//!   `pending → fulfilled | rejected` lifecycle
//! - **Slices**: one reducer per collection, each owning one entity table
//! - **Selectors**: derived views cached on input identity
//! - **Store**: owns the state, issues intents, applies settled phases
//!
//! # Example
//!
//! ```no_run
//! use feedsync_store::{Selectors, Store, StoreConfig};
//! use feedsync_store::remote::mock::FakeApi;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let mut store = Store::new(Arc::new(FakeApi::new()), StoreConfig::default());
//! let mut selectors = Selectors::new();
//!
//! if let Some(handle) = store.fetch_posts() {
//!     store.settle(handle).await;
//! }
//! let posts = selectors.all_posts(store.state());
//! # let _ = posts;
//! # }
//! ```

pub mod action;
mod config;
mod error;
pub mod operation;
pub mod remote;
pub mod selectors;
pub mod slices;
mod state;
mod store;

pub use action::{Action, FetchSince, NotificationsAction, PostsAction, StagedPost, UsersAction};
pub use config::StoreConfig;
pub use error::{RemoteError, RemoteResult, StoreError, StoreResult};
pub use operation::{OperationHandle, OperationKind, OperationTask, Phase, PhaseEvent};
pub use remote::{Collection, RemoteSource};
pub use selectors::{EntityList, Recomputations, Selectors};
pub use slices::{NotificationsState, PostsState, SyncStatus, UsersState};
pub use state::RootState;
pub use store::Store;
