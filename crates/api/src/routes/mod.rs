//! Route registry.

use axum::routing::post;
use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod work_results;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/work-results", post(work_results::receive_work_results))
}
