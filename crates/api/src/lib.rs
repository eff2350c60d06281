//! Work-broker HTTP/WebSocket service.
//!
//! Clients connect over WebSocket and issue work requests; completed results
//! arrive asynchronously on the notification endpoint and are correlated
//! back to the waiting client. See `dispatch` for the cache-first flow and
//! `notifications` for the inbound envelope handling.

pub mod config;
pub mod correlator;
pub mod dispatch;
pub mod error;
pub mod notifications;
pub mod queue;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
