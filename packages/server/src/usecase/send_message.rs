//! UseCase: メッセージ送信処理
//!
//! 検証 → 永続化 → ルームへのブロードキャスト、の順に行う。
//! 永続化に成功したメッセージだけがブロードキャストされる。

use std::sync::Arc;

use crate::domain::{
    ChatEvent, CorrelationId, GroupId, MessageReceived, MessageStore, Principal, RoomRegistry,
    validation::{MessageInput, validate_new_message},
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageStore>,
    registry: Arc<dyn RoomRegistry>,
    /// 本文の最大文字数
    max_message_chars: usize,
}

impl SendMessageUseCase {
    pub fn new(
        messages: Arc<dyn MessageStore>,
        registry: Arc<dyn RoomRegistry>,
        max_message_chars: usize,
    ) -> Self {
        Self {
            messages,
            registry,
            max_message_chars,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(MessageReceived)` - ブロードキャストしたイベント
    /// * `Err(SendMessageError)` - 検証または永続化の失敗（何もブロードキャストされない）
    pub async fn execute(
        &self,
        sender: &Principal,
        group_id: GroupId,
        input: MessageInput,
        temp_id: Option<CorrelationId>,
    ) -> Result<MessageReceived, SendMessageError> {
        // 1. 検証
        let new_message = validate_new_message(input, self.max_message_chars)?;

        // 2. 永続化
        let message = self
            .messages
            .append(sender.user_id, group_id, new_message)
            .await
            .map_err(SendMessageError::Persistence)?;

        // 3. ルームへブロードキャスト
        let event = MessageReceived::new(&message, sender, temp_id);
        let delivered = self
            .registry
            .broadcast(group_id, ChatEvent::MessageReceived(event.clone()))
            .await;
        tracing::info!(
            "Message {} from user {} broadcast to {} connection(s) in group {}",
            message.id,
            sender.user_id,
            delivered,
            group_id
        );

        Ok(event)
    }
}
