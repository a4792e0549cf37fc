//! API Router configuration

use super::call_handler::{call_number, get_current_state};
use super::error::panic_response;
use super::metrics_handler::metrics_handler;
use super::pages::{display_page, staff_page};
use super::state::AppState;
use super::status_handler::{health_check, legacy_media_list, media_list};
use super::websocket::websocket_handler;
use crate::config::ServerConfig;
use crate::infrastructure::media::MEDIA_URL_PREFIX;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Build the application router
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let media_dir = ServeDir::new(state.media.folder());

    // Pages
    let page_routes = Router::new()
        .route("/", get(staff_page))
        .route("/display", get(display_page));

    // Call routes
    let call_routes = Router::new()
        .route("/api/call_number", post(call_number))
        .route("/api/current_state", get(get_current_state));

    // Status routes (`/media-list` answers with the bare URL array)
    let status_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/media-list", get(media_list))
        .route("/media-list", get(legacy_media_list))
        .route("/metrics", get(metrics_handler));

    // Real-time channel
    let ws_routes = Router::new().route("/ws", get(websocket_handler));

    Router::new()
        .merge(page_routes)
        .merge(call_routes)
        .merge(status_routes)
        .merge(ws_routes)
        .nest_service(MEDIA_URL_PREFIX, media_dir)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if server.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
