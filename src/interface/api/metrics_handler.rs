//! Prometheus metrics handler

use super::state::AppState;
use crate::application::metrics::{
    BROADCASTS_TOTAL, CALLS_REJECTED_TOTAL, CALLS_TOTAL, CONNECTED_CLIENTS,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder
///
/// Call once per process; a second install fails.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(CALLS_TOTAL, "Total number of calls accepted");
    describe_counter!(
        CALLS_REJECTED_TOTAL,
        "Total number of call submissions rejected by validation"
    );
    describe_counter!(BROADCASTS_TOTAL, "Total number of state broadcasts");
    describe_gauge!(
        CONNECTED_CLIENTS,
        "Number of currently connected real-time clients"
    );

    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally
pub fn detached_metrics_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// HTTP metrics handler
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    (StatusCode::OK, state.prometheus.render()).into_response()
}
