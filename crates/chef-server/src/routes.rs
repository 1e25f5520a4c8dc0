use crate::error::ApiError;
use crate::service::ChatReply;
use crate::state::{AppState, API_VERSION};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(status))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
    pub session_id: String,
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "version": API_VERSION,
        "active_sessions": state.active_sessions(),
    }))
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state.chat.chat(&body.session_id, &body.message).await?;
    Ok(Json(reply))
}
