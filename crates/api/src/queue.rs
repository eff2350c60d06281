//! Worker pool submission channel.
//!
//! Submission is fire-and-forget: `Ok(())` means only "handed to the worker
//! pool", never "computed". Completion arrives later on the notification
//! endpoint. No retries happen at this layer; failures propagate to the
//! dispatcher's boundary.

use std::time::Duration;

use async_trait::async_trait;
use workbroker_core::types::WorkRequest;

/// HTTP request timeout for a single enqueue attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for worker submission failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("Worker submission request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The worker pool endpoint returned a non-2xx status code.
    #[error("Worker pool returned HTTP {0}")]
    HttpStatus(u16),
}

/// Enqueue seam to the backend worker pool.
///
/// Injected as a trait object so tests substitute a recording fake.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Enqueue one validated work request.
    async fn submit(&self, request: &WorkRequest) -> Result<(), SubmissionError>;
}

/// [`WorkQueue`] implementation that POSTs requests to the worker pool's
/// HTTP endpoint.
pub struct HttpWorkQueue {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpWorkQueue {
    /// Create a queue targeting `endpoint`, with a pre-configured client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WorkQueue for HttpWorkQueue {
    async fn submit(&self, request: &WorkRequest) -> Result<(), SubmissionError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        if !response.status().is_success() {
            return Err(SubmissionError::HttpStatus(response.status().as_u16()));
        }
        tracing::info!(uuid = %request.uuid, "Work request handed to the worker pool");
        Ok(())
    }
}
