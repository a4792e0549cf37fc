//! API request/response DTOs

use crate::domain::call::Call;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
///
/// `{"status": "success", "data": ...}` or `{"status": "error", "message": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message),
        }
    }
}

/// Echo of an accepted call
#[derive(Debug, Serialize, Deserialize)]
pub struct CallAccepted {
    pub number: String,
    pub counter: String,
}

impl From<&Call> for CallAccepted {
    fn from(call: &Call) -> Self {
        Self {
            number: call.number().to_string(),
            counter: call.counter().to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub calls_in_history: usize,
    pub connected_clients: usize,
}

/// Media list response
#[derive(Debug, Serialize, Deserialize)]
pub struct MediaListResponse {
    pub status: String,
    pub media_files: Vec<String>,
    pub count: usize,
}
