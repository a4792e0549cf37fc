//! Callboard - a real-time "call a number to a counter" display board
//!
//! Staff submit a (number, counter) pair over HTTP or the WebSocket channel;
//! every connected display receives the current call and a short history.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::{DomainError, Result};
