use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use workbroker_core::types::WorkRequest;

use crate::dispatch;
use crate::state::AppState;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with [`ClientHub`]
/// (crate::ws::ClientHub) and managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the hub.
///   2. Spawns a sender task that forwards messages from the hub channel.
///   3. Parses inbound text frames as work requests and dispatches each one
///      on its own task, so one slow cache lookup never blocks the next
///      request on the same connection.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = state.hub.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_inbound(&state, &conn_id, text.as_str()).await;
            }
            Ok(_msg) => {
                // Binary and ping frames carry no work requests.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (and its routes) and abort sender task.
    state.hub.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Parse one inbound text frame as a [`WorkRequest`] and dispatch it.
///
/// Each request runs on its own task; a dispatch failure is surfaced to the
/// issuing client on its response channel and never tears down the
/// connection or affects other in-flight requests.
async fn handle_inbound(state: &AppState, conn_id: &str, text: &str) {
    let request: WorkRequest = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(conn_id = %conn_id, error = %e, "Unparseable work request frame");
            return;
        }
    };

    state.hub.register_route(&request.uuid, conn_id).await;

    let state = state.clone();
    tokio::spawn(async move {
        let uuid = request.uuid.clone();
        if let Err(e) = dispatch::dispatch_work_request(&state, request).await {
            tracing::warn!(uuid = %uuid, error = %e, "Work request rejected");
            let frame = crate::correlator::error_frame(&uuid, &e);
            state.hub.deliver(&uuid, frame).await;
        }
    });
}
