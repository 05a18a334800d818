//! Conversion logic between DTOs and domain types.

use bookhaven_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatEvent, ChatEventError, CorrelationId, Group, InboundChatEvent, Membership, MessageError,
    MessageReceived, User,
};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// Wire → Domain
// ========================================

impl From<ws::InboundChatMessage> for InboundChatEvent {
    fn from(dto: ws::InboundChatMessage) -> Self {
        Self {
            text: dto.message,
            // 空の temp_id は相関 ID なしとして扱う
            temp_id: dto.temp_id.and_then(|t| CorrelationId::new(t).ok()),
        }
    }
}

/// Decode a text frame into an inbound event.
pub fn decode_inbound(text: &str) -> Result<InboundChatEvent, ChatEventError> {
    serde_json::from_str::<ws::InboundChatMessage>(text)
        .map(InboundChatEvent::from)
        .map_err(|e| ChatEventError::Malformed(e.to_string()))
}

// ========================================
// Domain → Wire
// ========================================

impl From<&MessageReceived> for ws::NewMessageEvent {
    fn from(event: &MessageReceived) -> Self {
        Self {
            id: event.message_id.value(),
            temp_id: event.temp_id.as_ref().map(|t| t.as_str().to_string()),
            user_id: event.sender.user_id.value(),
            username: event.sender.username.as_str().to_string(),
            user_full_name: event.sender.full_name.clone(),
            text: event.text.clone(),
            file_name: event.file_name.clone(),
            timestamp: timestamp_to_rfc3339(event.timestamp.value()),
            message_type: ws::MessageType::NewMessage,
        }
    }
}

impl From<&MessageError> for ws::MessageErrorEvent {
    fn from(event: &MessageError) -> Self {
        Self {
            r#type: ws::ErrorEventType::MessageError,
            temp_id: event.temp_id.as_ref().map(|t| t.as_str().to_string()),
            error: event.error.clone(),
        }
    }
}

/// Wire form of an event; `None` for control events such as eviction.
pub fn outbound_event(event: &ChatEvent) -> Option<ws::OutboundEvent> {
    match event {
        ChatEvent::MessageReceived(e) => Some(ws::OutboundEvent::NewMessage(e.into())),
        ChatEvent::MessageError(e) => Some(ws::OutboundEvent::Error(e.into())),
        ChatEvent::Evicted => None,
    }
}

/// Encode an outbound event as a JSON text frame.
///
/// Returns `Ok(None)` for events that have no wire form.
pub fn encode_event(event: &ChatEvent) -> Result<Option<String>, serde_json::Error> {
    outbound_event(event)
        .map(|wire| serde_json::to_string(&wire))
        .transpose()
}

impl From<&MessageReceived> for http::ChatMessageDto {
    fn from(event: &MessageReceived) -> Self {
        let wire = ws::NewMessageEvent::from(event);
        Self {
            id: wire.id,
            temp_id: wire.temp_id,
            user_id: wire.user_id,
            username: wire.username,
            user_full_name: wire.user_full_name,
            text: wire.text,
            file_name: wire.file_name,
            timestamp: wire.timestamp,
        }
    }
}

impl From<&User> for http::UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username.as_str().to_string(),
            first_name: user.first_name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            bio: user.bio.clone(),
            date_joined: timestamp_to_rfc3339(user.date_joined.value()),
        }
    }
}

impl From<&Group> for http::GroupSummaryDto {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.value(),
            name: group.name.as_str().to_string(),
            description: group.description.clone(),
            content_item_id: group.content_item_id.value(),
            is_private: group.is_private,
            creator_id: group.creator.map(|c| c.value()),
            created_at: timestamp_to_rfc3339(group.created_at.value()),
        }
    }
}

impl From<&Membership> for http::MemberDto {
    fn from(membership: &Membership) -> Self {
        Self {
            user_id: membership.user_id.value(),
            group_id: membership.group_id.value(),
            role: membership.role.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(membership.joined_at.value()),
        }
    }
}
