//! In-memory feed for testing without network access.
//!
//! Serves canned bodies keyed by URL and records every request, so callers
//! can assert how often a feed was hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::FetchError;
use super::feed::Fetch;

#[derive(Debug, Default)]
struct MockState {
    bodies: HashMap<String, Result<String, u16>>,
    requests: Vec<String>,
}

/// Mock feed that serves canned responses by URL.
///
/// Clones share state, so a test can keep a handle after giving a clone away.
#[derive(Debug, Clone, Default)]
pub struct MockFeed {
    state: Arc<Mutex<MockState>>,
    delay: Option<Duration>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response, to widen race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Serve `body` for `url`.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        self.state().bodies.insert(url.into(), Ok(body.into()));
    }

    /// Answer `url` with an HTTP error status.
    pub fn insert_status(&self, url: impl Into<String>, status: u16) {
        self.state().bodies.insert(url.into(), Err(status));
    }

    /// Total number of requests served or failed.
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Number of requests made for `url`.
    pub fn requests_for(&self, url: &str) -> usize {
        self.state().requests.iter().filter(|u| *u == url).count()
    }
}

impl Fetch for MockFeed {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = {
            let mut state = self.state();
            state.requests.push(url.to_string());
            state.bodies.get(url).cloned()
        };

        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_inserted_body() {
        let feed = MockFeed::new();
        feed.insert("http://feed.test/a.txt", "hello");

        assert_eq!(feed.fetch_text("http://feed.test/a.txt").await.unwrap(), "hello");
        assert_eq!(feed.requests_for("http://feed.test/a.txt"), 1);
    }

    #[tokio::test]
    async fn unknown_url_is_not_found() {
        let feed = MockFeed::new();
        let err = feed.fetch_text("http://feed.test/missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(feed.request_count(), 1);
    }

    #[tokio::test]
    async fn status_error() {
        let feed = MockFeed::new();
        feed.insert_status("http://feed.test/busy", 503);

        let err = feed.fetch_text("http://feed.test/busy").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let feed = MockFeed::new();
        let handle = feed.clone();
        feed.insert("http://feed.test/a.txt", "hello");

        handle.fetch_text("http://feed.test/a.txt").await.unwrap();
        assert_eq!(feed.request_count(), 1);
    }
}
