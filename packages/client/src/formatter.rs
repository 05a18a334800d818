//! Message formatting utilities for client display.

use bookhaven_server::infrastructure::dto::websocket::{MessageErrorEvent, NewMessageEvent};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message broadcast to the room
    ///
    /// `is_mine` marks the echo of a message this client sent.
    pub fn format_new_message(event: &NewMessageEvent, is_mine: bool) -> String {
        let me_suffix = if is_mine { " (me)" } else { "" };
        let body = match (&event.file_name, event.text.is_empty()) {
            (Some(file_name), true) => format!("[file] {}", file_name),
            (Some(file_name), false) => format!("{}\n[file] {}", event.text, file_name),
            (None, _) => event.text.clone(),
        };
        format!(
            "\n\n{RULE}\n\
             @{} ({}){}: {}\n\
             sent at {}\n\
             {RULE}\n",
            event.username, event.user_full_name, me_suffix, body, event.timestamp
        )
    }

    /// Format an error reply, quoting the rejected text when known
    pub fn format_message_error(event: &MessageErrorEvent, original: Option<&str>) -> String {
        match original {
            Some(text) => format!("\n! not sent \"{}\": {}\n", text, event.error),
            None => format!("\n! {}\n", event.error),
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
