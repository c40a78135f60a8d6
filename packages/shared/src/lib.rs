//! Utilities shared by the Lobby server and client.

pub mod logger;
pub mod time;
