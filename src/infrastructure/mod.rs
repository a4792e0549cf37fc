//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Filesystem access for the media library

pub mod media;
