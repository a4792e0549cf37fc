/// WebSocket adapter for the real-time channel
///
/// Frames are JSON text objects `{"event": ..., "data": ...}`. Clients send
/// `call_number`; the server sends `current_state` and `error`.
use super::state::AppState;
use crate::application::{CallBoardService, CallSource, ClientConnection, ServerEvent};
use crate::domain::call::CallRequest;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, warn};

/// Client→server events
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    CallNumber(CallRequest),
}

/// WebSocket handler
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.board))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, board: Arc<CallBoardService>) {
    let ClientConnection {
        id,
        initial_state,
        mut events,
    } = board.gateway().connect();
    let (mut sender, mut receiver) = socket.split();

    // Current state goes to this client only
    if let Some(msg) = encode(&initial_state) {
        if sender.send(msg).await.is_err() {
            warn!("Failed to send initial state to client {}", id);
            board.gateway().disconnect(id);
            return;
        }
    }

    // Replies addressed to this client alone, e.g. validation errors
    let (reply_tx, mut reply_rx) = mpsc::channel::<ServerEvent>(16);

    let mut send_task = tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Every event is a full snapshot, the next one catches up
                        warn!("Client {} lagged, skipped {} events", id, skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                Some(event) = reply_rx.recv() => event,
            };

            if let Some(msg) = encode(&event) {
                if sender.send(msg).await.is_err() {
                    debug!("Failed to send {} to client {}", event.name(), id);
                    break;
                }
            }
        }
    });

    let recv_board = board.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if let Some(reply) = handle_client_message(&recv_board, &text) {
                        if reply_tx.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => {
                    debug!("Client {} sent close frame", id);
                    break;
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Axum answers pings itself
                }
                Message::Binary(_) => {
                    debug!("Received binary message from client {} (ignored)", id);
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    board.gateway().disconnect(id);
}

/// Process one text frame; returns a reply meant for the sender only
///
/// Accepted calls are not answered directly: the resulting broadcast
/// already reaches this client.
pub fn handle_client_message(board: &CallBoardService, text: &str) -> Option<ServerEvent> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            debug!("Malformed client message {:?}: {}", text, e);
            return Some(ServerEvent::error(format!("Invalid message: {}", e)));
        }
    };

    match event {
        ClientEvent::CallNumber(request) => match board.submit(&request, CallSource::WebSocket) {
            Ok(_) => None,
            Err(e) => Some(ServerEvent::error(e.to_string())),
        },
    }
}

fn encode(event: &ServerEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            error!("Failed to serialize {} event: {}", event.name(), e);
            None
        }
    }
}
