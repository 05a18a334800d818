//! WebSocket event DTOs.
//!
//! Wire shapes:
//!
//! ```text
//! inbound:  {"message": "...", "temp_id": "..."}
//! success:  {"id": 1, "temp_id": "...", "user_id": 1, "username": "...",
//!            "user_full_name": "...", "text": "...",
//!            "timestamp": "2025-01-01T00:00:00.000+00:00",
//!            "message_type": "new_message"}
//! error:    {"type": "message.error", "temp_id": "...", "error": "..."}
//! ```
//!
//! `temp_id` is omitted when the client did not supply one.

use serde::{Deserialize, Serialize};

/// Message sent by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundChatMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    NewMessage,
}

/// Broadcast for a persisted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessageEvent {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub user_full_name: String,
    pub text: String,
    /// Last path segment of the attachment, for file messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub timestamp: String,
    pub message_type: MessageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorEventType {
    #[serde(rename = "message.error")]
    MessageError,
}

/// Error reply to the originating connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageErrorEvent {
    pub r#type: ErrorEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
    pub error: String,
}

/// Any event the server pushes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundEvent {
    NewMessage(NewMessageEvent),
    Error(MessageErrorEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_event_wire_shape() {
        // テスト項目: new_message イベントが仕様通りのキーで直列化され、temp_id が無い場合は省略される
        // given (前提条件):
        let event = NewMessageEvent {
            id: 7,
            temp_id: None,
            user_id: 3,
            username: "alice".to_string(),
            user_full_name: "Alice Liddell".to_string(),
            text: "hi".to_string(),
            file_name: None,
            timestamp: "2025-01-01T00:00:00.000+00:00".to_string(),
            message_type: MessageType::NewMessage,
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "user_id": 3,
                "username": "alice",
                "user_full_name": "Alice Liddell",
                "text": "hi",
                "timestamp": "2025-01-01T00:00:00.000+00:00",
                "message_type": "new_message"
            })
        );
    }

    #[test]
    fn test_message_error_event_wire_shape() {
        // テスト項目: エラーイベントは type = "message.error" で直列化される
        // given (前提条件):
        let event = MessageErrorEvent {
            r#type: ErrorEventType::MessageError,
            temp_id: Some("t2".to_string()),
            error: "Message could not be processed.".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({
                "type": "message.error",
                "temp_id": "t2",
                "error": "Message could not be processed."
            })
        );
    }

    #[test]
    fn test_inbound_message_optional_fields() {
        // テスト項目: message・temp_id はどちらも省略・null を許容する
        // given (前提条件):
        let only_message = r#"{"message":"hello"}"#;
        let null_message = r#"{"message":null,"temp_id":"t1"}"#;
        let empty_object = "{}";

        // when (操作):
        let a: InboundChatMessage = serde_json::from_str(only_message).unwrap();
        let b: InboundChatMessage = serde_json::from_str(null_message).unwrap();
        let c: InboundChatMessage = serde_json::from_str(empty_object).unwrap();

        // then (期待する結果):
        assert_eq!(a.message.as_deref(), Some("hello"));
        assert_eq!(a.temp_id, None);
        assert_eq!(b.message, None);
        assert_eq!(b.temp_id.as_deref(), Some("t1"));
        assert_eq!(c, InboundChatMessage::default());
    }

    #[test]
    fn test_outbound_event_deserializes_both_variants() {
        // テスト項目: クライアント側で受信イベントを種類ごとに判別できる
        // given (前提条件):
        let error_json = r#"{"type":"message.error","error":"boom"}"#;
        let message_json = r#"{"id":1,"user_id":2,"username":"bob","user_full_name":"Bob","text":"yo","timestamp":"2025-01-01T00:00:00.000+00:00","message_type":"new_message"}"#;

        // when (操作):
        let error: OutboundEvent = serde_json::from_str(error_json).unwrap();
        let message: OutboundEvent = serde_json::from_str(message_json).unwrap();

        // then (期待する結果):
        assert!(matches!(error, OutboundEvent::Error(e) if e.error == "boom"));
        assert!(matches!(message, OutboundEvent::NewMessage(m) if m.text == "yo"));
    }
}
