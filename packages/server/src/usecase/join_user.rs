//! UseCase: 参加表明（user_join）処理
//!
//! payload から identity を取り出して registry に追加し、
//! 更新後の参加者数を送信者を含む全接続にブロードキャストします。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::{ConnectionId, Identity, UserRegistry},
    infrastructure::dto::websocket::{ServerEvent, USER_JOIN, UserJoinPayload},
};

use super::{Broadcaster, EventError, EventHandler};

/// 参加表明のユースケース
pub struct JoinUserUseCase {
    registry: Arc<dyn UserRegistry>,
    broadcaster: Arc<Broadcaster>,
}

impl JoinUserUseCase {
    pub fn new(registry: Arc<dyn UserRegistry>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 参加表明を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加後の参加者数
    /// * `Err(EventError::InvalidPayload)` - `email` を持たない payload（registry は変更されない）
    pub async fn execute(&self, origin: ConnectionId, data: Value) -> Result<usize, EventError> {
        let payload = UserJoinPayload::try_from(data).map_err(|e| EventError::InvalidPayload {
            event: USER_JOIN,
            reason: e.to_string(),
        })?;
        let identity = Identity::from(payload);
        tracing::info!("Connection {} joined as '{}'", origin, identity);

        let _sequence = self.broadcaster.sequence().await;
        let count = self.registry.join(origin, identity).await;
        self.broadcaster
            .broadcast(&ServerEvent::UpdateUsers(count), origin, true)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl EventHandler for JoinUserUseCase {
    async fn handle(&self, origin: ConnectionId, data: Value) -> Result<(), EventError> {
        self.execute(origin, data).await.map(|_| ())
    }
}
