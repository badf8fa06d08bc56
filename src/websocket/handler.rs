//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use std::sync::Arc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::view::render;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    tracing::debug!(connection_id = %connection_id, "WebSocket connected");

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    if !send(&mut sender, &connected).await {
        tracing::debug!(connection_id = %connection_id, "Failed to send connected message");
        return;
    }

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
        };

        let reply = match message {
            Message::Text(text) => handle_text(&state, &connection_id, &text),
            Message::Binary(_) => ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            },
            // Axum answers pings itself
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => {
                tracing::debug!(connection_id = %connection_id, "Client requested close");
                break;
            }
        };

        if !send(&mut sender, &reply).await {
            tracing::debug!(
                connection_id = %connection_id,
                "WebSocket send failed, closing connection"
            );
            break;
        }
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket disconnected");
}

/// Turn one text frame into the reply for it
fn handle_text(state: &AppState, connection_id: &str, text: &str) -> ServerMessage {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                text = %text,
                "Invalid client message"
            );
            return ServerMessage::Error {
                message: format!("Invalid message format: {}", e),
            };
        }
    };

    match message {
        ClientMessage::Render(selection) => match selection.resolve(state) {
            Ok(request) => ServerMessage::Chart {
                series: render(&state.table, &request),
            },
            Err(e) => ServerMessage::Error {
                message: e.to_string(),
            },
        },
        ClientMessage::Ping => ServerMessage::Pong,
    }
}

/// Serialize and send one message; false once the socket is gone
async fn send<S>(sender: &mut S, message: &ServerMessage) -> bool
where
    S: Sink<Message> + Unpin,
{
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            return true;
        }
    };
    sender.send(Message::Text(text)).await.is_ok()
}
