//! WebSocket client session management.

use std::fmt::Display;

use futures_util::{Sink, SinkExt, StreamExt};
use lobby_server::infrastructure::dto::websocket::{ClientFrame, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Who this client announces itself as
#[derive(Debug, Clone)]
pub struct Profile {
    /// Identity sent with `user_join`
    pub email: String,
    /// Name shown as `sender` on outgoing messages
    pub name: String,
}

/// Render one incoming text frame for the terminal
fn render_frame(text: &str) -> String {
    match ServerEvent::parse(text) {
        Ok(ServerEvent::UpdateUsers(count)) => MessageFormatter::format_update_users(count),
        Ok(ServerEvent::ChatMessage(data)) => MessageFormatter::format_chat_message(&data),
        Err(_) => MessageFormatter::format_raw_message(text),
    }
}

/// Send each input line as a `new_message` until the input channel closes.
///
/// The receiver is borrowed, so lines not yet consumed stay queued for the
/// next session when this future is dropped.
pub async fn forward_input<S>(
    input: &mut mpsc::UnboundedReceiver<String>,
    sender: &str,
    write: &mut S,
) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(line) = input.recv().await {
        let json = ClientFrame::new_message(sender, &line).to_json()?;
        write
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
    }

    Ok(())
}

/// Run the WebSocket client session
///
/// Returns `Ok(())` when the user exits (the input channel closes),
/// `ClientError::ConnectionError` when the server cannot be reached and
/// `ClientError::ConnectionLost` when an established session drops.
pub async fn run_client_session(
    url: &str,
    profile: &Profile,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}' <{}>. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        profile.name, profile.email
    );

    let (mut write, mut read) = ws_stream.split();

    // Announce presence before anything else
    let join = ClientFrame::user_join(&profile.email).to_json()?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

    // Spawn a task to handle incoming frames
    let name_for_read = profile.name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", render_frame(text.as_str()));
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Whichever side finishes first ends the session
    let outcome = tokio::select! {
        _ = &mut read_task => Err(ClientError::ConnectionLost("server went away".to_string())),
        result = forward_input(input, &profile.name, &mut write) => result,
    };
    read_task.abort();

    if outcome.is_ok() {
        write.close().await.ok();
    }
    outcome
}
