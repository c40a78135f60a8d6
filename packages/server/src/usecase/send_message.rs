//! UseCase: メッセージ送信（new_message）処理
//!
//! 受け取ったオブジェクトにサーバーのローカル時刻（HH:MM）を付与し、
//! 送信者を含む全接続にブロードキャストします。メッセージは保存しません。

use std::sync::Arc;

use async_trait::async_trait;
use lobby_shared::time::{Clock, chat_timestamp};
use serde_json::Value;

use crate::{
    domain::{ChatMessage, ConnectionId},
    infrastructure::dto::websocket::{NEW_MESSAGE, ServerEvent},
};

use super::{Broadcaster, EventError, EventHandler};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    broadcaster: Arc<Broadcaster>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(broadcaster: Arc<Broadcaster>, clock: Arc<dyn Clock>) -> Self {
        Self { broadcaster, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ブロードキャストしたメッセージ
    /// * `Err(EventError::InvalidPayload)` - payload が JSON オブジェクトでない
    pub async fn execute(
        &self,
        origin: ConnectionId,
        data: Value,
    ) -> Result<ChatMessage, EventError> {
        let body = match data {
            Value::Object(body) => body,
            other => {
                return Err(EventError::InvalidPayload {
                    event: NEW_MESSAGE,
                    reason: format!("expected an object, got {}", kind_of(&other)),
                });
            }
        };

        let message = ChatMessage::stamp(body, chat_timestamp(self.clock.as_ref()));
        let event = ServerEvent::from(message.clone());
        self.broadcaster.broadcast(&event, origin, true).await?;

        Ok(message)
    }
}

#[async_trait]
impl EventHandler for SendMessageUseCase {
    async fn handle(&self, origin: ConnectionId, data: Value) -> Result<(), EventError> {
        self.execute(origin, data).await.map(|_| ())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, MockMessagePusher},
        infrastructure::message_pusher::WebSocketMessagePusher,
    };
    use chrono::{FixedOffset, TimeZone};
    use lobby_shared::time::FixedClock;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn fixed_clock(hour: u32, minute: u32) -> Arc<dyn Clock> {
        let time = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, hour, minute, 42)
            .unwrap();
        Arc::new(FixedClock::new(time))
    }

    #[tokio::test]
    async fn test_message_is_stamped_and_echoed_to_sender() {
        // テスト項目: timestamp が付与され、送信者を含む全接続に届く
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = SendMessageUseCase::new(
            Arc::new(Broadcaster::new(pusher.clone())),
            fixed_clock(14, 7),
        );
        let sender = ConnectionId::generate();
        let (sender_tx, mut sender_rx) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();
        pusher.register_client(sender, sender_tx).await;
        pusher
            .register_client(ConnectionId::generate(), other_tx)
            .await;

        // when (操作):
        let message = usecase
            .execute(sender, json!({"sender": "a", "text": "hi"}))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.timestamp(), Some("14:07"));
        let expected = json!({
            "event": "chat_message",
            "data": {"sender": "a", "text": "hi", "timestamp": "14:07"}
        });
        for rx in [&mut sender_rx, &mut other_rx] {
            let frame: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            assert_eq!(frame, expected);
        }
    }

    #[tokio::test]
    async fn test_arbitrary_fields_are_relayed() {
        // テスト項目: sender / text 以外のフィールドもそのまま中継される
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = SendMessageUseCase::new(
            Arc::new(Broadcaster::new(pusher.clone())),
            fixed_clock(8, 0),
        );

        // when (操作):
        let message = usecase
            .execute(
                ConnectionId::generate(),
                json!({"sender": "a", "text": "hi", "color": "red", "meta": {"tab": 2}}),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.body().get("color"), Some(&json!("red")));
        assert_eq!(message.body().get("meta"), Some(&json!({"tab": 2})));
        assert_eq!(message.timestamp(), Some("08:00"));
    }

    #[tokio::test]
    async fn test_non_object_payload_is_dropped() {
        // テスト項目: オブジェクトでない payload は InvalidPayload になり、ブロードキャストされない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let usecase = SendMessageUseCase::new(
            Arc::new(Broadcaster::new(Arc::new(pusher))),
            fixed_clock(8, 0),
        );

        // when (操作):
        let results = [
            usecase.execute(ConnectionId::generate(), json!("hi")).await,
            usecase.execute(ConnectionId::generate(), Value::Null).await,
            usecase.execute(ConnectionId::generate(), json!([1, 2])).await,
        ];

        // then (期待する結果):
        for result in results {
            assert!(matches!(
                result,
                Err(EventError::InvalidPayload {
                    event: NEW_MESSAGE,
                    ..
                })
            ));
        }
    }
}
