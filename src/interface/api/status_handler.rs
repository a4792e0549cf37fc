//! Health and media list handlers

use super::dto::{HealthResponse, MediaListResponse};
use super::state::AppState;
use axum::{extract::State, Json};

/// Health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        calls_in_history: state.board.store().len(),
        connected_clients: state.board.gateway().client_count(),
    })
}

/// Media files for the display page, scanned at startup
pub async fn media_list(State(state): State<AppState>) -> Json<MediaListResponse> {
    Json(MediaListResponse {
        status: "success".to_string(),
        media_files: state.media.files().to_vec(),
        count: state.media.count(),
    })
}

/// Bare array of media URLs, the shape older display pages read
pub async fn legacy_media_list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.media.files().to_vec())
}
