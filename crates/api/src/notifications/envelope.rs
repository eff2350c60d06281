//! The notification transport's envelope format.

use serde::Deserialize;

/// Inbound push message, classified by its `Type` tag.
///
/// A closed union: kinds the transport may add in the future land in
/// [`Unknown`](NotificationEnvelope::Unknown) and are rejected explicitly
/// rather than silently ignored. An envelope missing its required keys
/// fails deserialization outright, which callers treat as a structural
/// validation failure.
#[derive(Debug, Deserialize)]
#[serde(tag = "Type")]
pub enum NotificationEnvelope {
    /// Channel-subscription handshake; carries a one-time confirmation URL.
    SubscriptionConfirmation {
        #[serde(rename = "SubscribeURL")]
        subscribe_url: String,
    },

    /// Channel-removal handshake; same confirmation mechanics.
    UnsubscribeConfirmation {
        #[serde(rename = "SubscribeURL")]
        subscribe_url: String,
    },

    /// A content notification with a nested JSON-string payload.
    Notification {
        #[serde(rename = "Message")]
        message: String,
    },

    /// Any kind this version does not understand.
    #[serde(other)]
    Unknown,
}

/// Failure reading the transport body itself.
///
/// This is the only error the notification endpoint surfaces as a non-2xx;
/// every payload-level problem is logged and swallowed so the transport
/// does not retry-storm us with the same broken envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The POST body was not JSON at all.
    #[error("Unreadable notification body: {0}")]
    UnreadableBody(#[source] serde_json::Error),
}
