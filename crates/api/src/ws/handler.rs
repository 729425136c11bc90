use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters for the WebSocket upgrade request.
///
/// Browsers cannot set an `Authorization` header on a WebSocket handshake,
/// so the access token travels as `?token=`.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// HTTP handler that authenticates and upgrades the connection to WebSocket.
///
/// The access token is validated before the upgrade; unauthenticated
/// requests are rejected with 401 and never reach the socket layer.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let token = params.token.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing token query parameter".into()))
    })?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, claims.sub)))
}

/// Own one socket for its whole life: register it with the manager, pump
/// queued frames out through a writer task, watch inbound for the close,
/// then deregister.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: DbId) {
    let conn_id = Uuid::new_v4();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut outbound = ws_manager.add(conn_id, user_id).await;
    let (mut sink, stream) = socket.split();

    // Everything queued for this socket leaves through this one writer.
    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if sink.send(frame).await.is_err() {
                tracing::debug!(conn_id = %conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    read_until_closed(stream, conn_id).await;

    ws_manager.remove(conn_id).await;
    writer.abort();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket disconnected");
}

/// Drain inbound frames until the peer closes or the transport errors.
///
/// The push channel is one-way; inbound traffic is connection upkeep only
/// (Pong replies to the heartbeat, the eventual Close).
async fn read_until_closed(mut stream: SplitStream<WebSocket>, conn_id: Uuid) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }
}
