use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::{
    ChatMessage, GroupId, MessageId, MessageStore, NewChatMessage, RepositoryError, UserId,
};

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn append(
        &self,
        sender: UserId,
        group_id: GroupId,
        message: NewChatMessage,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut state = self.state.lock().await;
        state.ensure_group(group_id)?;
        state.user(sender)?;

        let id = state.next_message_id;
        state.next_message_id += 1;

        let (text, attachment) = message.into_parts();
        let message = ChatMessage {
            id: MessageId::new(id),
            group_id,
            sender,
            text,
            attachment,
            timestamp: self.now(),
        };
        state.messages.insert(id, message.clone());
        tracing::debug!("Message {} appended to group {}", id, group_id);

        Ok(message)
    }

    async fn list_by_group(&self, group_id: GroupId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().await;
        state.ensure_group(group_id)?;
        let mut messages: Vec<ChatMessage> = state
            .messages
            .values()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.timestamp, m.id));
        Ok(messages)
    }
}
