use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters accepted by the WebSocket endpoint.
///
/// Browsers cannot set an `Authorization` header on WebSocket upgrades,
/// so the access token is passed as a `token` query parameter instead.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// HTTP handler that authenticates and upgrades the connection to WebSocket.
///
/// The access token is validated before the upgrade; unauthenticated
/// requests are rejected with 401. After the upgrade the connection is
/// registered with `WsManager` and managed by two spawned tasks
/// (sender + receiver).
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let claims = validate_token(&query.token, &state.config.jwt).map_err(|_| {
        AppError::Core(civiclink_core::error::CoreError::Unauthorized(
            "Invalid or expired access token".into(),
        ))
    })?;

    Ok(ws.on_upgrade(move |socket| {
        handle_socket(
            socket,
            state.ws_manager,
            claims.sub,
            claims.email,
            claims.role,
        )
    }))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    profile_id: i64,
    email: String,
    role: String,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, profile_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), profile_id, email, role).await;

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

    // Receiver loop: the feed is push-only, so inbound traffic is limited
    // to protocol frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
