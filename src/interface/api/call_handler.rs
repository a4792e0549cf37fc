//! Call API handlers

use super::dto::{ApiResponse, CallAccepted};
use super::error::ApiError;
use super::state::AppState;
use crate::application::CallSource;
use crate::domain::call::{CallRequest, CurrentState};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::debug;

/// Call a number to a counter
pub async fn call_number(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CallAccepted>>, ApiError> {
    let Json(request) = payload?;
    debug!("API: Call request {:?}", request);

    let call = state.board.submit(&request, CallSource::Http)?;

    Ok(Json(ApiResponse::success(CallAccepted::from(&call))))
}

/// Get the call on screen and the history below it
pub async fn get_current_state(State(state): State<AppState>) -> Json<ApiResponse<CurrentState>> {
    Json(ApiResponse::success(state.board.current_state()))
}
