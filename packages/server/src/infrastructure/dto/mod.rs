//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! - `websocket`: event frames exchanged over the WebSocket channel
//! - `conversion`: mapping between DTOs and domain types

pub mod conversion;
pub mod websocket;
