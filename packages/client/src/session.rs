//! WebSocket client session management.

use std::sync::Arc;

use bookhaven_server::infrastructure::dto::websocket::{InboundChatMessage, OutboundEvent};
use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{
    domain::PendingMessages, error::ClientError, formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// How the read side of a session ended
enum ReadEnd {
    /// The server sent a close frame before any chat event
    Refused,
    Lost,
    Finished,
}

/// Run one WebSocket client session
pub async fn run_client_session(url: &str, group_id: i64, token: &str) -> Result<(), ClientError> {
    let url = format!(
        "{}/ws/groups/{}/chat?token={}",
        url.trim_end_matches('/'),
        group_id,
        token
    );

    let (ws_stream, _) = connect_async(&url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to group {}", group_id);
    println!(
        "\nYou are in group {}. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        group_id
    );

    let (mut write, mut read) = ws_stream.split();
    let pending = Arc::new(Mutex::new(PendingMessages::new()));
    let prompt = format!("group {}> ", group_id);

    // Spawn a task to handle incoming events
    let pending_for_read = pending.clone();
    let prompt_for_read = prompt.clone();
    let mut read_task = tokio::spawn(async move {
        let mut received_any = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    received_any = true;
                    let formatted = match serde_json::from_str::<OutboundEvent>(text.as_str()) {
                        Ok(OutboundEvent::NewMessage(event)) => {
                            let is_mine = pending_for_read
                                .lock()
                                .await
                                .resolve(event.temp_id.as_deref())
                                .is_some();
                            MessageFormatter::format_new_message(&event, is_mine)
                        }
                        Ok(OutboundEvent::Error(event)) => {
                            let original = pending_for_read
                                .lock()
                                .await
                                .resolve(event.temp_id.as_deref());
                            MessageFormatter::format_message_error(&event, original.as_deref())
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return if received_any {
                        ReadEnd::Lost
                    } else {
                        ReadEnd::Refused
                    };
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return ReadEnd::Lost;
                }
                _ => {}
            }
        }

        ReadEnd::Finished
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_for_input = prompt.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_for_input) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send typed lines, each tagged with a fresh temp id
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let temp_id = pending.lock().await.track(&line);
            let msg = InboundChatMessage {
                message: Some(line),
                temp_id: Some(temp_id),
            };

            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                return true;
            }
        }
        false
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result.unwrap_or(ReadEnd::Lost) {
                ReadEnd::Refused => Err(ClientError::Rejected(group_id)),
                ReadEnd::Lost | ReadEnd::Finished => Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )),
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            Ok(())
        }
    }
}
