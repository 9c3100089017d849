//! `/ws/search`: one search session per socket.
//!
//! Client → server: `{"type":"input","value":"..."}`, `{"type":"dismiss"}`,
//! `{"type":"select","id":"603","media_type":"movie"}`.
//!
//! Server → client: `{"type":"view","view":{...}}` and
//! `{"type":"navigate","url":"/watch?id=603&type=movie"}`.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
    Extension,
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::{
    middleware::RequestId,
    models::{MediaType, NavigationState, SearchView},
    services::{SearchController, SearchEvent, SearchHandle, SearchUpdate},
};

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Input { value: String },
    Dismiss,
    Select { id: String, media_type: MediaType },
}

impl From<ClientMessage> for SearchEvent {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Input { value } => SearchEvent::Input(value),
            ClientMessage::Dismiss => SearchEvent::Dismiss,
            ClientMessage::Select { id, media_type } => {
                SearchEvent::Select(NavigationState::new(id, media_type))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    View { view: SearchView },
    Navigate { url: String },
}

impl From<SearchUpdate> for ServerMessage {
    fn from(update: SearchUpdate) -> Self {
        match update {
            SearchUpdate::View(view) => ServerMessage::View { view },
            SearchUpdate::Navigate(url) => ServerMessage::Navigate { url },
        }
    }
}

/// Handles WebSocket upgrade requests to `/ws/search`
pub async fn search_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let controller = state.search_controller();
    ws.on_upgrade(move |socket| handle_search_socket(socket, controller, request_id))
}

/// Bridges one socket to one search session until either side goes away.
///
/// Outbound updates and inbound gestures are pumped by separate tasks, so a
/// slow session never stops the socket from being drained in either direction.
async fn handle_search_socket(
    socket: WebSocket,
    controller: SearchController,
    request_id: RequestId,
) {
    let SearchHandle {
        events,
        updates,
        task,
    } = controller.spawn();

    tracing::info!(request_id = %request_id, "Search session opened");

    let (sink, stream) = socket.split();
    let mut outbound = tokio::spawn(forward_updates(updates, sink, request_id.clone()));
    let mut inbound = tokio::spawn(forward_messages(stream, events, request_id.clone()));

    // Whichever direction finishes first ends the other.
    tokio::select! {
        _ = &mut outbound => inbound.abort(),
        _ = &mut inbound => outbound.abort(),
    }

    // Aborted pumps drop their channel ends, which stops the session.
    if let Err(e) = task.await {
        tracing::error!(request_id = %request_id, error = %e, "Search session task failed");
    }

    tracing::info!(request_id = %request_id, "Search session closed");
}

async fn forward_updates(
    mut updates: mpsc::Receiver<SearchUpdate>,
    mut sink: SplitSink<WebSocket, Message>,
    request_id: RequestId,
) {
    while let Some(update) = updates.recv().await {
        let text = match serde_json::to_string(&ServerMessage::from(update)) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Failed to encode search update");
                continue;
            }
        };
        if sink.send(Message::Text(text)).await.is_err() {
            break; // Client disconnected
        }
    }
}

async fn forward_messages(
    mut stream: SplitStream<WebSocket>,
    events: mpsc::Sender<SearchEvent>,
    request_id: RequestId,
) {
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(message) => {
                    if events.send(message.into()).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(request_id = %request_id, error = %e, "Ignoring malformed search message");
                }
            },
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {} // ping/pong/binary
        }
    }
}
