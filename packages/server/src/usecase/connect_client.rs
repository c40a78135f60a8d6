//! UseCase: クライアント接続処理
//!
//! 新しい接続を送信対象に登録し、現在の参加者数をその接続にだけ送ります。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, PusherChannel, UserRegistry},
    infrastructure::dto::websocket::ServerEvent,
};

use super::{Broadcaster, EventError};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    registry: Arc<dyn UserRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl ConnectClientUseCase {
    pub fn new(registry: Arc<dyn UserRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 接続処理を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 接続時点の参加者数（この接続に `update_users` として送信済み）
    /// * `Err(EventError)` - 送信失敗
    pub async fn execute(
        &self,
        connection: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, EventError> {
        let _sequence = self.broadcaster.sequence().await;
        self.broadcaster.attach(connection, sender).await;

        let count = self.registry.count().await;
        self.broadcaster
            .send_to(connection, &ServerEvent::UpdateUsers(count))
            .await?;

        Ok(count)
    }
}
