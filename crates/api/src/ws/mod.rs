//! WebSocket infrastructure for client channels.
//!
//! Provides connection management, request-to-connection correlation routes,
//! heartbeat monitoring, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::ClientHub;
