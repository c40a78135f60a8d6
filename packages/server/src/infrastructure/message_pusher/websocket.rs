//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - クライアントへのフレーム送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受付は UI 層（`ui::handler::websocket`）で行われます。
//! この実装は生成された sender を受け取り、送信にだけ使用します。
//! sender の先では接続ごとの writer タスクがソケットへ書き込みます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// Shared map of open connections to their outbound channels
pub type ConnectionMap = Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>;

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_client(connection, tx).await;
/// pusher.push_to(connection, r#"{"event":"update_users","data":1}"#).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの sender
    clients: ConnectionMap,
}

impl WebSocketMessagePusher {
    pub fn new(clients: ConnectionMap) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection, sender);
        tracing::debug!("Connection {} registered to MessagePusher", connection);
    }

    async fn unregister_client(&self, connection: ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&connection);
        tracing::debug!("Connection {} unregistered from MessagePusher", connection);
    }

    async fn push_to(
        &self,
        connection: ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&connection)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection {}", connection);

        Ok(())
    }

    async fn broadcast(&self, content: &str, except: Option<ConnectionId>) -> usize {
        let clients = self.clients.lock().await;
        let mut delivered = 0;

        for (connection, sender) in clients.iter() {
            if Some(*connection) == except {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to push message to connection {}: {}", connection, e)
                }
            }
        }
        tracing::debug!("Broadcasted message to {} connection(s)", delivered);

        delivered
    }
}
