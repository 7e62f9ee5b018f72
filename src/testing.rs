// src/testing.rs
//! In-memory [`PageFetcher`] for tests.
//!
//! ```rust,ignore
//! let fetcher = MockFetcher::new()
//!     .with_text("https://www.work.ua/resumes-analyst/?notitle=1", "<html>…</html>")
//!     .with_json("https://employer-api.robota.ua/cvdb/resumes", json!({"documents": []}));
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::FetchError;
use crate::sites::PageFetcher;

/// Serves canned responses by URL and records every request.
///
/// Text responses are reusable. JSON responses queue per URL and are consumed
/// one per call, so successive pages of a POST API can differ.
#[derive(Default, Clone)]
pub struct MockFetcher {
    texts: Arc<RwLock<HashMap<String, Result<String, FetchError>>>>,
    json: Arc<RwLock<HashMap<String, VecDeque<Result<Value, FetchError>>>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    get_calls: Arc<RwLock<Vec<String>>>,
    post_calls: Arc<RwLock<Vec<(String, Value)>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&self, url: &str, body: &str) {
        self.texts
            .write()
            .unwrap()
            .insert(url.to_string(), Ok(body.to_string()));
    }

    /// Make GET requests for `url` fail with `error`.
    pub fn add_text_error(&self, url: &str, error: FetchError) {
        self.texts.write().unwrap().insert(url.to_string(), Err(error));
    }

    /// Hold GET responses for `url` back by `delay`.
    pub fn add_delay(&self, url: &str, delay: Duration) {
        self.delays.write().unwrap().insert(url.to_string(), delay);
    }

    pub fn add_json(&self, url: &str, body: Value) {
        self.push_json(url, Ok(body));
    }

    /// Queue a failing POST response for `url`.
    pub fn add_json_error(&self, url: &str, error: FetchError) {
        self.push_json(url, Err(error));
    }

    fn push_json(&self, url: &str, response: Result<Value, FetchError>) {
        self.json
            .write()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn with_text(self, url: &str, body: &str) -> Self {
        self.add_text(url, body);
        self
    }

    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.add_json(url, body);
        self
    }

    /// URLs requested via GET, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.read().unwrap().clone()
    }

    /// URL and body of each POST, in call order.
    pub fn post_calls(&self) -> Vec<(String, Value)> {
        self.post_calls.read().unwrap().clone()
    }
}

fn not_found(url: &str) -> FetchError {
    FetchError::Status {
        url: url.to_string(),
        status: 404,
        message: "no canned response".to_string(),
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.get_calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let canned = self.texts.read().unwrap().get(url).cloned();
        canned.unwrap_or_else(|| Err(not_found(url)))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        self.post_calls
            .write()
            .unwrap()
            .push((url.to_string(), body.clone()));

        let queued = self
            .json
            .write()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front);
        queued.unwrap_or_else(|| Err(not_found(url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_calls_and_serves_queue() {
        let mock = MockFetcher::new()
            .with_text("https://a.test/1", "one")
            .with_json("https://api.test", json!({"page": 1}))
            .with_json("https://api.test", json!({"page": 2}));

        assert_eq!(mock.get_text("https://a.test/1").await.unwrap(), "one");
        assert!(mock.get_text("https://a.test/2").await.is_err());

        let body = json!({"q": "x"});
        assert_eq!(mock.post_json("https://api.test", &body).await.unwrap()["page"], 1);
        assert_eq!(mock.post_json("https://api.test", &body).await.unwrap()["page"], 2);
        assert!(mock.post_json("https://api.test", &body).await.is_err());

        assert_eq!(mock.get_calls(), vec!["https://a.test/1", "https://a.test/2"]);
        assert_eq!(mock.post_calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_text_waits() {
        let mock = MockFetcher::new().with_text("https://a.test/slow", "late");
        mock.add_delay("https://a.test/slow", Duration::from_secs(5));

        let started = tokio::time::Instant::now();
        assert_eq!(mock.get_text("https://a.test/slow").await.unwrap(), "late");
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
