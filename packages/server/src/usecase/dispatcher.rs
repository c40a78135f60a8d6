//! Event dispatch table.
//!
//! Maps client event names to their handlers. The table is built once at
//! startup and shared read-only by every connection.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::{domain::ConnectionId, infrastructure::dto::websocket::ClientFrame};

use super::EventError;

/// Handler for one named client event
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, origin: ConnectionId, data: Value) -> Result<(), EventError>;
}

/// イベント名 → ハンドラーの対応表
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<&'static str, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`, replacing any previous registration
    pub fn register(mut self, event: &'static str, handler: Arc<dyn EventHandler>) -> Self {
        if self.handlers.insert(event, handler).is_some() {
            tracing::warn!("Handler for '{}' was registered twice", event);
        }
        self
    }

    /// Route a decoded frame to its handler
    pub async fn dispatch(&self, origin: ConnectionId, frame: ClientFrame) -> Result<(), EventError> {
        let handler = self
            .handlers
            .get(frame.event.as_str())
            .ok_or_else(|| EventError::UnknownEvent(frame.event.clone()))?;
        tracing::debug!("Dispatching '{}' from {}", frame.event, origin);
        handler.handle(origin, frame.data).await
    }

    /// Decode a raw text frame and route it
    pub async fn dispatch_text(&self, origin: ConnectionId, text: &str) -> Result<(), EventError> {
        let frame = ClientFrame::parse(text).map_err(EventError::MalformedFrame)?;
        self.dispatch(origin, frame).await
    }
}
