//! HTTP API endpoint handlers.
//!
//! A minimal operational surface next to the WebSocket endpoint: a
//! health check for wake-up detection and two read-only room views for
//! debugging live sessions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::RoomId;
use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.repository.snapshot().await;
    Json(rooms.into_iter().map(Into::into).collect())
}

/// Get one room's membership by id
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.repository.room(&room).await {
        Some(snapshot) => Ok(Json(snapshot.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}
