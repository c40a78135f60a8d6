//! InMemory UserRegistry 実装
//!
//! プロセス内のメモリだけで identity の集合を保持します。
//! 再起動すると状態はすべて失われます。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DisconnectPolicy, Identity, UserRegistry};

#[derive(Debug, Default)]
struct Members {
    /// Distinct joined identities
    identities: HashSet<Identity>,
    /// Which identity each connection joined with (only tracked under `DisconnectPolicy::Forget`)
    owners: HashMap<ConnectionId, Identity>,
}

impl Members {
    /// Drop `identity` unless another connection still holds it
    fn release_if_orphaned(&mut self, identity: &Identity) {
        if !self.owners.values().any(|owner| owner == identity) {
            self.identities.remove(identity);
        }
    }
}

/// インメモリ UserRegistry 実装
///
/// All state sits behind one lock, so join/leave/count are serialized.
pub struct InMemoryUserRegistry {
    members: Mutex<Members>,
    policy: DisconnectPolicy,
}

impl InMemoryUserRegistry {
    pub fn new(policy: DisconnectPolicy) -> Self {
        Self {
            members: Mutex::new(Members::default()),
            policy,
        }
    }
}

impl Default for InMemoryUserRegistry {
    fn default() -> Self {
        Self::new(DisconnectPolicy::default())
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn join(&self, connection: ConnectionId, identity: Identity) -> usize {
        let mut members = self.members.lock().await;

        if self.policy == DisconnectPolicy::Forget {
            if let Some(previous) = members.owners.insert(connection, identity.clone())
                && previous != identity
            {
                members.release_if_orphaned(&previous);
            }
        }

        if members.identities.insert(identity.clone()) {
            tracing::debug!("Identity '{}' joined", identity);
        } else {
            tracing::debug!("Identity '{}' was already registered", identity);
        }

        members.identities.len()
    }

    async fn leave(&self, connection: ConnectionId) -> usize {
        let mut members = self.members.lock().await;

        match self.policy {
            DisconnectPolicy::Retain => {}
            DisconnectPolicy::Forget => {
                if let Some(identity) = members.owners.remove(&connection) {
                    members.release_if_orphaned(&identity);
                    tracing::debug!("Connection {} released identity '{}'", connection, identity);
                }
            }
        }

        members.identities.len()
    }

    async fn count(&self) -> usize {
        self.members.lock().await.identities.len()
    }
}
