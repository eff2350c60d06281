//! Envelope classification and routing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use workbroker_core::types::WorkResponse;

use crate::correlator::ResponseCorrelator;
use crate::notifications::envelope::{EnvelopeError, NotificationEnvelope};

/// HTTP request timeout for a single confirmation fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for confirmation-URL fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("Confirmation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The confirmation endpoint returned a non-2xx status code.
    #[error("Confirmation endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

/// Seam for fetching a handshake's one-time confirmation URL.
#[async_trait]
pub trait ConfirmationFetcher: Send + Sync {
    /// GET the confirmation URL once.
    async fn fetch(&self, url: &str) -> Result<(), ConfirmationError>;
}

/// [`ConfirmationFetcher`] that performs a plain HTTP GET.
pub struct HttpConfirmer {
    client: reqwest::Client,
}

impl HttpConfirmer {
    /// Create a confirmer with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }
}

impl Default for HttpConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationFetcher for HttpConfirmer {
    async fn fetch(&self, url: &str) -> Result<(), ConfirmationError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ConfirmationError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Classifies inbound envelopes and routes them.
///
/// Handshake envelopes trigger exactly one confirmation fetch and never
/// reach the correlator. Content notifications are decoded and forwarded;
/// a decode failure is terminal for that single envelope only — it is
/// logged and discarded, and processing of later envelopes is unaffected.
pub struct NotificationRouter {
    confirmer: Arc<dyn ConfirmationFetcher>,
    correlator: Arc<ResponseCorrelator>,
}

impl NotificationRouter {
    /// Create a router over the given confirmer and correlator.
    pub fn new(confirmer: Arc<dyn ConfirmationFetcher>, correlator: Arc<ResponseCorrelator>) -> Self {
        Self {
            confirmer,
            correlator,
        }
    }

    /// Process one raw transport body.
    ///
    /// Returns `Err` only when the body cannot be read as JSON at all; any
    /// envelope- or payload-level problem is logged and swallowed so the
    /// transport sees success and does not redeliver.
    pub async fn handle(&self, body: &str) -> Result<(), EnvelopeError> {
        let raw: serde_json::Value =
            serde_json::from_str(body).map_err(EnvelopeError::UnreadableBody)?;

        let envelope = match serde_json::from_value::<NotificationEnvelope>(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(error = %e, "Envelope failed structural validation, discarding");
                return Ok(());
            }
        };

        match envelope {
            NotificationEnvelope::SubscriptionConfirmation { subscribe_url } => {
                self.confirm(&subscribe_url, "subscription").await;
            }
            NotificationEnvelope::UnsubscribeConfirmation { subscribe_url } => {
                self.confirm(&subscribe_url, "unsubscription").await;
            }
            NotificationEnvelope::Notification { message } => {
                self.route_notification(&message).await;
            }
            NotificationEnvelope::Unknown => {
                tracing::error!("Unknown envelope kind, discarding");
            }
        }

        Ok(())
    }

    /// Fetch a handshake's confirmation URL exactly once.
    ///
    /// Failures are logged and swallowed: the transport will resend the
    /// handshake, and duplicate confirmations are tolerated upstream.
    async fn confirm(&self, url: &str, kind: &'static str) {
        match self.confirmer.fetch(url).await {
            Ok(()) => tracing::info!(url, kind, "Channel handshake confirmed"),
            Err(e) => tracing::error!(url, kind, error = %e, "Channel handshake fetch failed"),
        }
    }

    /// Decode a content notification's payload and hand it to the correlator.
    async fn route_notification(&self, message: &str) {
        let result = match serde_json::from_str::<WorkResponse>(message) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Undecodable notification payload, discarding");
                return;
            }
        };

        tracing::info!(uuid = %result.request.uuid, "Work result received");
        self.correlator.on_work_result(result).await;
    }
}
