//! Domain layer - Core rules of the call board
//!
//! This layer contains:
//! - Value Objects: validated number and counter labels
//! - Entities: calls and the current-state view
//! - The bounded call history store

pub mod call;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
