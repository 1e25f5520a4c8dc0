//! ChefAI HTTP API server (Axum).
//!
//! `GET /` reports status and the live session count; `POST /chat` relays a
//! message through the session's history to the completion service.

pub mod error;
pub mod logging;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use chef_core::ChefConfig;
use chef_llm::GroqClient;
use service::CompletionSettings;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    // Wide open; restrict origins before exposing publicly.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::chat_routes())
        .with_state(state)
        .layer(cors)
}

/// Build state from config and serve until the process is stopped.
pub async fn start_server(config: &ChefConfig) -> anyhow::Result<()> {
    let client = GroqClient::new(&config.completion)?;
    let state = AppState::new(Arc::new(client), CompletionSettings::from_config(&config.completion));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!(%addr, model = %config.completion.model, "starting ChefAI server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app_with_state(state)).await?;

    Ok(())
}
