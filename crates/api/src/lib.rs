//! Webhook gateway for Muster.
//!
//! Receives chat events from the game-server admin tool and hands them to
//! the dispatcher.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check (never authenticated)
//! - `POST /api/v1/chat-events` - Ingest one chat event
//!
//! # Architecture
//!
//! ```text
//! Admin tool (chat log webhook)
//!    │
//!    ▼
//! ┌─────────────────┐
//! │  API Gateway    │ ◄── this crate (Axum)
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │   Dispatcher    │ ───► │  Admin API      │
//! │                 │      │  (roster, DMs)  │
//! └─────────────────┘      └─────────────────┘
//! ```

pub mod auth;
pub mod routes;
pub mod state;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use auth::ApiKeyConfig;
pub use state::AppState;

/// Create the gateway router. When `api_key` is set, everything except
/// `/health` requires a matching bearer token.
pub fn create_router(state: Arc<AppState>, api_key: Option<ApiKeyConfig>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/chat-events", post(routes::chat_event))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    if let Some(config) = api_key {
        router = router.layer(middleware::from_fn(move |request, next| {
            auth::api_key_auth(config.clone(), request, next)
        }));
    }

    router
}

/// Start the gateway on the given address.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    api_key: Option<ApiKeyConfig>,
) -> anyhow::Result<()> {
    let router = create_router(state, api_key);

    info!(%addr, "Starting Muster gateway");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
