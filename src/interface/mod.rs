//! Interface layer - External interfaces (HTTP, WebSocket)
//!
//! This layer handles:
//! - REST API endpoints
//! - The real-time WebSocket channel
//! - Staff and display pages
//! - Request/response formatting

pub mod api;
