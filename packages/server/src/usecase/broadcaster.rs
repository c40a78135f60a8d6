//! Event Broadcaster
//!
//! Encodes server events and hands them to the transport through [`MessagePusher`].

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    domain::{ConnectionId, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

use super::EventError;

/// Delivers named events to one connection or to every open connection
pub struct Broadcaster {
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// Orders "read the count, then queue the frame" steps across connections
    sequence: Mutex<()>,
}

impl Broadcaster {
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            pusher,
            sequence: Mutex::new(()),
        }
    }

    /// Hold this guard across a registry change and the frame announcing it.
    ///
    /// Count updates are then queued in the same order the registry saw them,
    /// so the last `update_users` every client receives is the current count.
    pub async fn sequence(&self) -> MutexGuard<'_, ()> {
        self.sequence.lock().await
    }

    /// Make a newly opened connection reachable
    pub async fn attach(&self, connection: ConnectionId, sender: PusherChannel) {
        self.pusher.register_client(connection, sender).await;
    }

    /// Stop delivering to a closed connection
    pub async fn detach(&self, connection: ConnectionId) {
        self.pusher.unregister_client(connection).await;
    }

    /// Send `event` to `connection` only
    pub async fn send_to(
        &self,
        connection: ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), EventError> {
        let json = event.to_json().map_err(EventError::Encode)?;
        self.pusher.push_to(connection, &json).await?;
        tracing::debug!("Sent '{}' to {}", event.name(), connection);
        Ok(())
    }

    /// Send `event` to every open connection, optionally skipping `origin`.
    ///
    /// Returns the number of connections the event was handed to.
    pub async fn broadcast(
        &self,
        event: &ServerEvent,
        origin: ConnectionId,
        include_origin: bool,
    ) -> Result<usize, EventError> {
        let json = event.to_json().map_err(EventError::Encode)?;
        let except = (!include_origin).then_some(origin);
        let delivered = self.pusher.broadcast(&json, except).await;
        tracing::debug!(
            "Broadcasted '{}' from {} to {} connection(s)",
            event.name(),
            origin,
            delivered
        );
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePushError, MockMessagePusher};

    const UPDATE_ONE: &str = r#"{"event":"update_users","data":1}"#;

    #[tokio::test]
    async fn test_send_to_encodes_event() {
        // テスト項目: send_to はイベントを JSON にして対象の接続へ送る
        // given (前提条件):
        let connection = ConnectionId::generate();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(move |target, content| *target == connection && content == UPDATE_ONE)
            .times(1)
            .returning(|_, _| Ok(()));
        let broadcaster = Broadcaster::new(Arc::new(pusher));

        // when (操作):
        let result = broadcaster
            .send_to(connection, &ServerEvent::UpdateUsers(1))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_to_propagates_push_error() {
        // テスト項目: 送信失敗は EventError::Push として返される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .returning(|target, _| Err(MessagePushError::ClientNotFound(target.to_string())));
        let broadcaster = Broadcaster::new(Arc::new(pusher));

        // when (操作):
        let result = broadcaster
            .send_to(ConnectionId::generate(), &ServerEvent::UpdateUsers(1))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(EventError::Push(MessagePushError::ClientNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_broadcast_including_origin() {
        // テスト項目: include_origin = true なら除外なしでブロードキャストする
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|content, except| content == UPDATE_ONE && except.is_none())
            .times(1)
            .returning(|_, _| 3);
        let broadcaster = Broadcaster::new(Arc::new(pusher));

        // when (操作):
        let delivered = broadcaster
            .broadcast(&ServerEvent::UpdateUsers(1), ConnectionId::generate(), true)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 3);
    }

    #[tokio::test]
    async fn test_broadcast_excluding_origin() {
        // テスト項目: include_origin = false なら送信元を除外する
        // given (前提条件):
        let origin = ConnectionId::generate();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(move |_, except| *except == Some(origin))
            .times(1)
            .returning(|_, _| 2);
        let broadcaster = Broadcaster::new(Arc::new(pusher));

        // when (操作):
        let delivered = broadcaster
            .broadcast(&ServerEvent::UpdateUsers(1), origin, false)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 2);
    }
}
