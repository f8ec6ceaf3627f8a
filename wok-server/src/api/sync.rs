//! Sync WebSocket endpoint
//!
//! `GET /api/sync` upgrades to a WebSocket carrying JSON-encoded
//! [`SyncEvent`]s. On connect the client receives one snapshot event per
//! collection at its current version, then live events as mutations land.
//! Snapshots are complete collections, so a client that misses events
//! (channel lag) is consistent again on the next one.

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tokio::sync::broadcast::error::RecvError;

use shared::message::SyncEvent;

use crate::core::ServerState;

const RESOURCES: [&str; 4] = ["menu", "orders", "categories", "announcements"];

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sync", get(upgrade))
}

async fn upgrade(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_connection(socket, state))
}

async fn serve_connection(mut socket: WebSocket, state: ServerState) {
    // Subscribe before the initial snapshots so nothing published in
    // between is lost.
    let mut events = state.sync.subscribe();

    for resource in RESOURCES {
        let snapshot = match state.collection_snapshot(resource).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(resource, error = %e, "Initial snapshot failed");
                continue;
            }
        };
        let event = SyncEvent::new(
            resource,
            state.resource_versions.get(resource),
            "snapshot",
            snapshot,
        );
        if send_event(&mut socket, &event).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    if send_event(&mut socket, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Sync subscriber lagged, catching up");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // Clients only listen; anything except close/ping is ignored.
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "Sync socket error");
                    break;
                }
            },
        }
    }
}

async fn send_event(socket: &mut WebSocket, event: &SyncEvent) -> Result<(), ()> {
    let payload = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Sync event serialization failed");
            return Ok(());
        }
    };
    socket
        .send(Message::Text(payload.into()))
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Sync subscriber disconnected");
        })
}
