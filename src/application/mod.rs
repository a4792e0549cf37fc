//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases:
//! - Accepting a call and recording it in the history
//! - Publishing the new board state to connected displays

pub mod call_board;
pub mod events;
pub mod gateway;
pub mod metrics;

pub use call_board::{CallBoardService, CallSource};
pub use events::ServerEvent;
pub use gateway::{BroadcastGateway, ClientConnection, ClientId, DEFAULT_CHANNEL_CAPACITY};
