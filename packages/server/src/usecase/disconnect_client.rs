//! UseCase: クライアント切断処理
//!
//! 切断理由（クライアントからの close、ネットワーク障害、タイムアウト）は区別しません。
//! 接続を送信対象から外し、registry に leave を通知したうえで、
//! 残っている全接続に現在の参加者数をブロードキャストします。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, UserRegistry},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{Broadcaster, EventError};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<dyn UserRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<dyn UserRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 切断処理を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 切断後の参加者数
    pub async fn execute(&self, connection: ConnectionId) -> Result<usize, EventError> {
        let _sequence = self.broadcaster.sequence().await;
        self.broadcaster.detach(connection).await;

        let count = self.registry.leave(connection).await;
        self.broadcaster
            .broadcast(&ServerEvent::UpdateUsers(count), connection, false)
            .await?;

        Ok(count)
    }
}
