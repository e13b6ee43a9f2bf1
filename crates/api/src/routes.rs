//! HTTP route handlers for the gateway.

use crate::AppState;
use axum::{extract::State, Json};
use muster_common::ChatEvent;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Chat-event ingestion response.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub accepted: bool,
}

/// Ingest one chat event from the admin tool's log webhook.
///
/// The event is processed before responding; by the time the webhook gets
/// its 200, every resulting in-game message has been handed to the admin
/// API. Unrelated chatter is accepted and dropped.
pub async fn chat_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<ChatEvent>,
) -> Json<EventResponse> {
    debug!(
        player = %event.player_id,
        content_preview = %event.content.chars().take(50).collect::<String>(),
        "Received chat event"
    );

    state.dispatcher.handle_event(&event).await;

    Json(EventResponse { accepted: true })
}
