//! Shared test fixtures: the full application router wired over in-memory
//! fakes, plus small request/response helpers.
//!
//! This mirrors the component wiring in `main.rs` so integration tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses — just with a recording worker
//! queue and confirmation fetcher instead of live HTTP.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use workbroker_api::config::ServerConfig;
use workbroker_api::correlator::ResponseCorrelator;
use workbroker_api::notifications::router::{ConfirmationError, ConfirmationFetcher};
use workbroker_api::notifications::NotificationRouter;
use workbroker_api::queue::{SubmissionError, WorkQueue};
use workbroker_api::router::build_app_router;
use workbroker_api::state::AppState;
use workbroker_api::ws::ClientHub;
use workbroker_cache::{CacheGateway, MemoryStore};
use workbroker_core::types::WorkRequest;

/// Worker queue fake that records every submission.
pub struct RecordingQueue {
    pub submissions: Mutex<Vec<WorkRequest>>,
    fail_next: AtomicBool,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Make the next submission fail with an HTTP 503.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.lock().await.len()
    }
}

#[async_trait]
impl WorkQueue for RecordingQueue {
    async fn submit(&self, request: &WorkRequest) -> Result<(), SubmissionError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SubmissionError::HttpStatus(503));
        }
        self.submissions.lock().await.push(request.clone());
        Ok(())
    }
}

/// Confirmation fetcher fake that records every fetched URL.
pub struct RecordingConfirmer {
    pub urls: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn new() -> Self {
        Self {
            urls: Mutex::new(Vec::new()),
        }
    }

    pub async fn fetch_count(&self) -> usize {
        self.urls.lock().await.len()
    }
}

#[async_trait]
impl ConfirmationFetcher for RecordingConfirmer {
    async fn fetch(&self, url: &str) -> Result<(), ConfirmationError> {
        self.urls.lock().await.push(url.to_string());
        Ok(())
    }
}

/// Cache store that fails every call, for degraded-store tests.
pub struct FailingStore;

#[async_trait]
impl workbroker_cache::CacheStore for FailingStore {
    async fn get(
        &self,
        _key: &str,
    ) -> Result<Option<serde_json::Value>, workbroker_cache::CacheStoreError> {
        Err(workbroker_cache::CacheStoreError::Backend(
            "store down".to_string(),
        ))
    }

    async fn set(
        &self,
        _key: &str,
        _value: serde_json::Value,
        _ttl: std::time::Duration,
    ) -> Result<(), workbroker_cache::CacheStoreError> {
        Err(workbroker_cache::CacheStoreError::Backend(
            "store down".to_string(),
        ))
    }
}

/// The wired application plus handles on the fakes for assertions.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    pub queue: Arc<RecordingQueue>,
    pub confirmer: Arc<RecordingConfirmer>,
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        sandbox_id: "test-sandbox".to_string(),
        cache_ttl_secs: 129_600,
        worker_queue_url: "http://localhost:4000/v1/work".to_string(),
    }
}

/// Wire the full application over in-memory fakes.
pub fn build_test_context() -> TestContext {
    build_test_context_with_store(Arc::new(MemoryStore::new()))
}

/// Same wiring, but over an arbitrary cache store (e.g. [`FailingStore`]).
pub fn build_test_context_with_store(store: Arc<dyn workbroker_cache::CacheStore>) -> TestContext {
    let config = test_config();

    let cache = Arc::new(CacheGateway::new(store, config.sandbox_id.clone()));
    let hub = Arc::new(ClientHub::new());
    let queue = Arc::new(RecordingQueue::new());
    let confirmer = Arc::new(RecordingConfirmer::new());

    let correlator = Arc::new(ResponseCorrelator::new(
        Arc::clone(&cache),
        Arc::clone(&hub),
    ));
    let notifications = Arc::new(NotificationRouter::new(
        Arc::clone(&confirmer) as Arc<dyn ConfirmationFetcher>,
        Arc::clone(&correlator),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        cache,
        hub,
        queue: Arc::clone(&queue) as Arc<dyn WorkQueue>,
        correlator,
        notifications,
    };

    let app = build_app_router(state.clone(), &config);

    TestContext {
        app,
        state,
        queue,
        confirmer,
    }
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw text body, the way the notification transport does.
pub async fn post_text(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
