//! WebSocket connection handlers.
//!
//! Each socket is served by two tasks: a receive loop that feeds client frames
//! to the dispatch table, and a pusher loop that drains the connection's
//! outbound channel into the socket. When either ends, the connection is over.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{domain::ConnectionId, ui::state::AppState, usecase::EventDispatcher};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames addressed to this connection
/// * `sender` - WebSocket sink to send frames to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns a task that reads client frames and routes them through the dispatch table.
///
/// Ends on close, on a transport error, or after `idle_timeout` without any frame.
fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    connection: ConnectionId,
    dispatcher: Arc<EventDispatcher>,
    idle_timeout: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let next = match idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, receiver.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::info!(
                            "Connection {} idle for {:?}, closing",
                            connection,
                            limit
                        );
                        break;
                    }
                },
                None => receiver.next().await,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error on {}: {}", connection, e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from {}: {}", connection, text.as_str());
                    if let Err(e) = dispatcher.dispatch_text(connection, text.as_str()).await {
                        tracing::warn!("Dropped frame from {}: {}", connection, e);
                    }
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from {}",
                        data.len(),
                        connection
                    );
                }
                Message::Close(_) => {
                    tracing::debug!("Connection {} requested close", connection);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    let (sender, receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    match state.connect_client_usecase.execute(connection, tx).await {
        Ok(count) => tracing::info!("Client connected: {} ({} users known)", connection, count),
        Err(e) => tracing::warn!("Failed to greet connection {}: {}", connection, e),
    }

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receive_loop(
        receiver,
        connection,
        state.dispatcher.clone(),
        state.idle_timeout,
    );

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_client_usecase.execute(connection).await {
        Ok(count) => tracing::info!(
            "Client disconnected: {} ({} users known)",
            connection,
            count
        ),
        Err(e) => tracing::warn!("Failed to handle disconnect of {}: {}", connection, e),
    }
}
