//! WebSocket connection handler.
//!
//! The upgrade is always accepted; authentication and membership are
//! checked on the open socket, and a failure closes it without any chat
//! event on the wire.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, Uri},
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatEvent, ChatEventError, GroupId},
    infrastructure::dto::conversion::{decode_inbound, encode_event},
    ui::{auth::credential_from, state::AppState},
    usecase::ChatConnection,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<i64>,
    headers: HeaderMap,
    uri: Uri,
) -> impl IntoResponse {
    let credential = credential_from(&headers, &uri);
    let group_id = GroupId::new(group_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, group_id, credential))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
///
/// Both room broadcasts and error replies for this connection arrive here.
/// An eviction sends a close frame and ends the loop.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Arc<ChatEvent>>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match encode_event(&event) {
                Ok(Some(json)) => json,
                Ok(None) => {
                    send_close(&mut sender).await;
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to encode chat event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn send_close(sender: &mut SplitSink<WebSocket, Message>) {
    if let Err(e) = sender.send(Message::Close(None)).await {
        tracing::debug!("Failed to send close frame: {}", e);
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    group_id: GroupId,
    credential: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut connection = ChatConnection::new(state.chat.clone(), group_id, tx);

    if let Err(e) = connection.open(credential.as_deref()).await {
        tracing::debug!("Closing socket for group {}: {}", group_id, e);
        send_close(&mut sender).await;
        return;
    }

    let mut send_task = pusher_loop(rx, sender);

    loop {
        tokio::select! {
            frame = receiver.next() => {
                let frame = match frame {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on '{}': {}", connection.id(), e);
                        break;
                    }
                    None => break,
                };

                let decoded = match frame {
                    Message::Text(text) => decode_inbound(text.as_str()),
                    Message::Binary(_) => Err(ChatEventError::UnsupportedFrame("binary")),
                    Message::Close(_) => {
                        tracing::info!("Connection '{}' requested close", connection.id());
                        break;
                    }
                    // Ping/pong is handled by the protocol layer
                    Message::Ping(_) | Message::Pong(_) => continue,
                };

                match decoded {
                    Ok(event) => {
                        let outcome = connection.handle_inbound(event).await;
                        tracing::debug!("Connection '{}': {:?}", connection.id(), outcome);
                    }
                    Err(e) => {
                        tracing::warn!("Dropping frame on '{}': {}", connection.id(), e);
                    }
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Outbound loop of '{}' ended", connection.id());
                break;
            }
        }
    }

    connection.close().await;
    send_task.abort();
}
