//! UserRegistry trait 定義
//!
//! 参加表明したユーザー（identity）の集合を管理するインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::{ConnectionId, Identity};

/// What happens to joined identities when a connection closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Identities stay registered for the lifetime of the process; the count never decreases
    #[default]
    Retain,
    /// An identity is released once no open connection has joined with it
    Forget,
}

/// Set of distinct identities that have announced presence.
///
/// Implementations must serialize mutations so that concurrent joins are never lost.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Add `identity`, joined over `connection`. Returns the count after the join.
    ///
    /// Joining with an identity that is already registered does not change the count.
    async fn join(&self, connection: ConnectionId, identity: Identity) -> usize;

    /// Handle the close of `connection`. Returns the count after the leave.
    async fn leave(&self, connection: ConnectionId) -> usize;

    /// Current number of distinct identities
    async fn count(&self) -> usize;
}
