//! Message formatting utilities for client display.

use serde_json::{Map, Value};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format an online-count update
    pub fn format_update_users(count: usize) -> String {
        let noun = if count == 1 { "user" } else { "users" };
        format!("\n* {} {} online\n", count, noun)
    }

    /// Format a relayed chat message as `[HH:MM] sender: text`
    ///
    /// Messages from other clients may carry any fields; missing ones fall back
    /// to placeholders, and a message without `text` is shown as raw JSON.
    pub fn format_chat_message(data: &Map<String, Value>) -> String {
        let timestamp = data
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or("--:--");
        let sender = data
            .get("sender")
            .and_then(Value::as_str)
            .unwrap_or("anonymous");

        match data.get("text").and_then(Value::as_str) {
            Some(text) => format!("\n[{}] {}: {}\n", timestamp, sender, text),
            None => format!(
                "\n[{}] {}: {}\n",
                timestamp,
                sender,
                Value::Object(data.clone())
            ),
        }
    }

    /// Format a text frame that is not a known server event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Format a binary frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", len)
    }
}
