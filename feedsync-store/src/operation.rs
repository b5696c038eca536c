//! Asynchronous operations and their phase lifecycle.
//!
//! A remote call is modelled as an explicit [`OperationTask`]: it is created
//! with every input it needs (including any snapshot of store state taken
//! before suspending), it announces itself with a `Pending` phase, and it
//! later settles exactly once as `Fulfilled` or `Rejected`. Settled phases are
//! delivered to the owning store as discrete [`Action`]s over a channel and
//! applied in arrival order.
//!
//! There is no deduplication, cancellation or retry here; callers that want
//! any of those gate on collection status before issuing.

use crate::action::Action;
use crate::error::{RemoteError, RemoteResult};
use feedsync_types::RequestId;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Names the logical operation a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    FetchPosts,
    AddNewPost,
    FetchUsers,
    FetchNotifications,
}

impl OperationKind {
    /// Action type prefix, e.g. `posts/fetchPosts`.
    pub fn type_prefix(&self) -> &'static str {
        match self {
            OperationKind::FetchPosts => "posts/fetchPosts",
            OperationKind::AddNewPost => "posts/addNewPost",
            OperationKind::FetchUsers => "users/fetchUsers",
            OperationKind::FetchNotifications => "notifications/fetchNotifications",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_prefix())
    }
}

/// Progress of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    /// The error message of the failed call.
    Rejected(String),
}

impl<T> Phase<T> {
    /// Phase name as shown in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Fulfilled(_) => "fulfilled",
            Phase::Rejected(_) => "rejected",
        }
    }

    /// Returns true for `Fulfilled` and `Rejected`.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Phase::Pending)
    }
}

/// A phase transition of one issued operation, with the task's input.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEvent<A, T> {
    pub request_id: RequestId,
    pub arg: A,
    pub phase: Phase<T>,
}

/// An operation that has been created but not yet run.
#[derive(Debug, Clone)]
pub struct OperationTask<A> {
    kind: OperationKind,
    request_id: RequestId,
    arg: A,
}

impl<A: Clone> OperationTask<A> {
    /// Creates a task with a fresh request id.
    pub fn new(kind: OperationKind, arg: A) -> Self {
        Self {
            kind,
            request_id: RequestId::new(),
            arg,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn arg(&self) -> &A {
        &self.arg
    }

    /// The `Pending` event announcing this task.
    pub fn pending<T>(&self) -> PhaseEvent<A, T> {
        PhaseEvent {
            request_id: self.request_id,
            arg: self.arg.clone(),
            phase: Phase::Pending,
        }
    }

    /// Runs `call` to completion and returns the settled event.
    ///
    /// A call still running after `timeout` is rejected with
    /// [`RemoteError::Timeout`].
    pub async fn settle<T, F>(self, timeout: Option<Duration>, call: F) -> PhaseEvent<A, T>
    where
        F: Future<Output = RemoteResult<T>>,
    {
        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(RemoteError::Timeout),
            },
            None => call.await,
        };
        let phase = match outcome {
            Ok(value) => Phase::Fulfilled(value),
            Err(e) => {
                warn!("{} {} rejected: {}", self.kind, self.request_id, e);
                Phase::Rejected(e.to_string())
            }
        };
        PhaseEvent {
            request_id: self.request_id,
            arg: self.arg,
            phase,
        }
    }
}

/// Handle to an issued operation.
#[derive(Debug)]
pub struct OperationHandle {
    kind: OperationKind,
    request_id: RequestId,
    join: JoinHandle<()>,
}

impl OperationHandle {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Waits until the settled phase has been queued for the store.
    ///
    /// The store applies it on its next `drain_completed`.
    pub async fn finished(self) {
        if let Err(e) = self.join.await {
            warn!("{} {} task failed: {}", self.kind, self.request_id, e);
        }
    }

    /// Returns true once the settled phase has been queued.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Sending half of the completion channel, cloned into every running task.
#[derive(Debug, Clone)]
pub(crate) struct Completions(mpsc::UnboundedSender<Action>);

impl Completions {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }

    /// Runs the task on the tokio runtime and queues its settled phase.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn<A, T, F>(
        &self,
        task: OperationTask<A>,
        timeout: Option<Duration>,
        call: F,
        into_action: fn(PhaseEvent<A, T>) -> Action,
    ) -> OperationHandle
    where
        A: Clone + Send + 'static,
        T: Send + 'static,
        F: Future<Output = RemoteResult<T>> + Send + 'static,
    {
        let kind = task.kind();
        let request_id = task.request_id();
        let tx = self.0.clone();
        let join = tokio::spawn(async move {
            let event = task.settle(timeout, call).await;
            debug!("{} {} {}", kind, request_id, event.phase.name());
            if tx.send(into_action(event)).is_err() {
                debug!("{} {} settled after the store was dropped", kind, request_id);
            }
        });
        OperationHandle {
            kind,
            request_id,
            join,
        }
    }
}
