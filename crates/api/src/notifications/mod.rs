//! Inbound notification-channel handling.
//!
//! The [`NotificationRouter`] classifies every envelope by kind before any
//! payload interpretation: confirmation handshakes get their URL fetched,
//! content notifications get decoded and forwarded to the correlator, and
//! everything else is logged and discarded without failing the transport.

pub mod envelope;
pub mod router;

pub use envelope::{EnvelopeError, NotificationEnvelope};
pub use router::{ConfirmationFetcher, HttpConfirmer, NotificationRouter};
