//! API interface implementations

pub mod call_handler;
pub mod dto;
pub mod error;
pub mod metrics_handler;
pub mod pages;
pub mod router;
pub mod state;
pub mod status_handler;
pub mod websocket;

pub use error::ApiError;
pub use metrics_handler::{detached_metrics_handle, init_metrics};
pub use router::build_router;
pub use state::AppState;
