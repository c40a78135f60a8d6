//! Shared state handed to every request handler.

use std::{sync::Arc, time::Duration};

use crate::usecase::{ConnectClientUseCase, DisconnectClientUseCase, EventDispatcher};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続時のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断時のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// クライアントイベントの dispatch table
    pub dispatcher: Arc<EventDispatcher>,
    /// Silence after which a connection is treated as closed
    pub idle_timeout: Option<Duration>,
}
