//! Events exchanged over a live chat connection.

use super::{
    entity::ChatMessage,
    identity::Principal,
    value_object::{CorrelationId, MessageId, Timestamp},
};

/// Event received from a client
///
/// `text` is the raw body as sent; emptiness is judged by the use case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundChatEvent {
    pub text: Option<String>,
    pub temp_id: Option<CorrelationId>,
}

/// Event pushed to connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A message was persisted; broadcast to the whole room
    MessageReceived(MessageReceived),
    /// A send failed; delivered to the originating connection only
    MessageError(MessageError),
    /// The user lost access to the room; the connection must close.
    /// Never encoded on the wire.
    Evicted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceived {
    pub message_id: MessageId,
    pub temp_id: Option<CorrelationId>,
    pub sender: Principal,
    pub text: String,
    pub file_name: Option<String>,
    pub timestamp: Timestamp,
}

impl MessageReceived {
    pub fn new(message: &ChatMessage, sender: &Principal, temp_id: Option<CorrelationId>) -> Self {
        Self {
            message_id: message.id,
            temp_id,
            sender: sender.clone(),
            text: message.text_or_empty().to_string(),
            file_name: message.attachment.as_ref().map(|a| a.file_name().to_string()),
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError {
    pub temp_id: Option<CorrelationId>,
    pub error: String,
}
