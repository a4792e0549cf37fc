//! Events pushed from the server to real-time clients

use crate::domain::call::CurrentState;
use serde::Serialize;

/// Server→client event, framed as `{"event": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full board snapshot
    CurrentState(CurrentState),
    /// Problem with something this client sent
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CurrentState(_) => "current_state",
            Self::Error { .. } => "error",
        }
    }
}
