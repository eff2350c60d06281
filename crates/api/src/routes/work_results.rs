//! The notification transport's inbound endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::state::AppState;

/// POST /api/v1/work-results
///
/// Receives one signed envelope from the notification transport as a raw
/// text body. Returns 200 for anything that could be read as JSON — even
/// when the envelope or its payload is rejected — because the transport
/// treats a non-2xx as "retry", and redelivering a broken envelope cannot
/// make it parse. Only an unreadable body gets a 500.
pub async fn receive_work_results(
    State(state): State<AppState>,
    body: String,
) -> impl IntoResponse {
    match state.notifications.handle(&body).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(error = %e, "Unreadable notification transport body");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
