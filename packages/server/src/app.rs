//! Dependency wiring.

use std::sync::Arc;

use lobby_shared::time::Clock;

use crate::{
    config::ServerConfig,
    infrastructure::{
        dto::websocket::{NEW_MESSAGE, USER_JOIN},
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryUserRegistry,
    },
    ui::Server,
    usecase::{
        Broadcaster, ConnectClientUseCase, DisconnectClientUseCase, EventDispatcher,
        JoinUserUseCase, SendMessageUseCase,
    },
};

/// Build a ready-to-run server from its configuration.
///
/// Dependencies are created in order:
/// 1. Registry
/// 2. MessagePusher / Broadcaster
/// 3. UseCases and the event dispatch table
/// 4. Server
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Registry (in-memory, wiped on restart)
    let registry = Arc::new(InMemoryUserRegistry::new(config.disconnect_policy()));

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let broadcaster = Arc::new(Broadcaster::new(message_pusher));

    // 3. UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        registry.clone(),
        broadcaster.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        broadcaster.clone(),
    ));
    let join_user_usecase = Arc::new(JoinUserUseCase::new(registry, broadcaster.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(broadcaster, clock));

    let dispatcher = EventDispatcher::new()
        .register(USER_JOIN, join_user_usecase)
        .register(NEW_MESSAGE, send_message_usecase);

    // 4. Server
    Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        Arc::new(dispatcher),
        config.static_dir.clone(),
        config.idle_timeout(),
    )
}
