//! Real-time chat relay library.
//!
//! Clients connect over WebSocket, announce their presence with an email
//! and broadcast chat messages that the server stamps with its local time.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod app;
pub mod config;
