//! Application state shared by all handlers

use crate::application::CallBoardService;
use crate::infrastructure::media::MediaLibrary;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<CallBoardService>,
    pub media: Arc<MediaLibrary>,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(
        board: Arc<CallBoardService>,
        media: Arc<MediaLibrary>,
        prometheus: PrometheusHandle,
    ) -> Self {
        Self {
            board,
            media,
            prometheus,
        }
    }
}
