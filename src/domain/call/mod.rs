//! Call bounded context - the calls shown on the board

pub mod entity;
pub mod history;
pub mod request;

pub use entity::{Call, CurrentState};
pub use history::{CallHistoryStore, DEFAULT_MAX_CALLS};
pub use request::{CallRequest, ValidatedCall};
