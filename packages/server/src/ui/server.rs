//! Server execution logic.

use std::{future::Future, path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::usecase::{ConnectClientUseCase, DisconnectClientUseCase, EventDispatcher};

use super::{handler::websocket_handler, signal::shutdown_signal, state::AppState};

/// Startup and serve failures; these are the only fatal errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(connect, disconnect, dispatcher, "static".into(), None);
/// server.run("127.0.0.1:5000").await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    dispatcher: Arc<EventDispatcher>,
    static_dir: PathBuf,
    idle_timeout: Option<Duration>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        dispatcher: Arc<EventDispatcher>,
        static_dir: PathBuf,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            dispatcher,
            static_dir,
            idle_timeout,
        }
    }

    /// Build the router: the page at `/`, the event channel at `/ws`, and
    /// every other path served from the static directory.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            dispatcher: self.dispatcher,
            idle_timeout: self.idle_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // 静的ファイル
            .route_service("/", ServeFile::new(self.static_dir.join("index.html")))
            .fallback_service(ServeDir::new(&self.static_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `bind_addr` (`host:port`) and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g. the port is in use)
    /// or if serving fails.
    pub async fn run(self, bind_addr: String) -> Result<(), ServerError> {
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!("Chat relay listening on http://{}", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
