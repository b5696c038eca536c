use std::time::Duration;

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound for a single remote call (ms). `None` waits forever.
    pub request_timeout_ms: Option<u64>,
    /// When set, `fetch_posts` only issues while the posts status is `idle`.
    pub gate_post_fetch_on_idle: bool,
}

impl StoreConfig {
    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: Some(30_000),
            gate_post_fetch_on_idle: true,
        }
    }
}
