//! MessagePusher trait 定義
//!
//! 接続中のクライアントへフレームを届ける能力を抽象化します。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound channel of one connection; the socket writer drains it
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Send capability over the set of open connections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除
    async fn unregister_client(&self, connection: ConnectionId);

    /// 特定の接続にだけ送信
    async fn push_to(&self, connection: ConnectionId, content: &str)
    -> Result<(), MessagePushError>;

    /// Send to every registered connection except `except`.
    ///
    /// Individual dead receivers are skipped. Returns how many connections
    /// the frame was handed to.
    async fn broadcast(&self, content: &str, except: Option<ConnectionId>) -> usize;
}
