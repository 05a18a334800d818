//! UseCase: HTTP 経由のメッセージ投稿
//!
//! WebSocket と同じ認可ゲートと送信処理を通り、ルームにブロードキャストされる。

use std::sync::Arc;

use crate::domain::{
    CorrelationId, GroupId, GroupRepository, MessageReceived, Principal,
    validation::MessageInput,
};

use super::{
    error::GroupError,
    membership_oracle::{MembershipOracle, require_member},
    send_message::SendMessageUseCase,
};

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    groups: Arc<dyn GroupRepository>,
    oracle: Arc<MembershipOracle>,
    send_message: Arc<SendMessageUseCase>,
}

impl PostMessageUseCase {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        oracle: Arc<MembershipOracle>,
        send_message: Arc<SendMessageUseCase>,
    ) -> Self {
        Self {
            groups,
            oracle,
            send_message,
        }
    }

    pub async fn execute(
        &self,
        sender: &Principal,
        group_id: GroupId,
        input: MessageInput,
        temp_id: Option<CorrelationId>,
    ) -> Result<MessageReceived, GroupError> {
        require_member(self.groups.as_ref(), &self.oracle, sender.user_id, group_id).await?;
        Ok(self
            .send_message
            .execute(sender, group_id, input, temp_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        domain::{ChatEvent, ConnectionId, RoomConnection, RoomRegistry, UserRepository, ValidationError},
        infrastructure::{
            repository::inmemory::test_support::{new_user, store_with_group},
            room_registry::InMemoryRoomRegistry,
        },
    };

    #[tokio::test]
    async fn test_post_file_message_is_broadcast() {
        // テスト項目: 添付ファイル付きの投稿が保存され、ルームにファイル名付きでブロードキャストされる
        // given (前提条件):
        let (store, alice, group) = store_with_group(1000).await;
        let store = Arc::new(store);
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry
            .join(
                group.id,
                RoomConnection {
                    id: ConnectionId::generate(),
                    user_id: alice.id,
                    sender: tx,
                },
            )
            .await;
        let oracle = Arc::new(MembershipOracle::new(store.clone()));
        let send = Arc::new(SendMessageUseCase::new(store.clone(), registry.clone(), 100));
        let usecase = PostMessageUseCase::new(store.clone(), oracle, send);
        let input = MessageInput {
            text: Some("see attached".to_string()),
            attachment: Some("group_chat_files/2025/05/17/notes.pdf".to_string()),
        };

        // when (操作):
        let event = usecase
            .execute(&alice.principal(), group.id, input, None)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(event.file_name.as_deref(), Some("notes.pdf"));
        assert_eq!(*rx.recv().await.unwrap(), ChatEvent::MessageReceived(event));
    }

    #[tokio::test]
    async fn test_post_requires_membership_and_content() {
        // テスト項目: 非メンバーの投稿は拒否され、空の投稿は検証エラーになる
        // given (前提条件):
        let (store, alice, group) = store_with_group(1000).await;
        let store = Arc::new(store);
        let mallory = store.create_user(new_user("mallory")).await.unwrap();
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let oracle = Arc::new(MembershipOracle::new(store.clone()));
        let send = Arc::new(SendMessageUseCase::new(store.clone(), registry, 100));
        let usecase = PostMessageUseCase::new(store.clone(), oracle, send);

        // when (操作):
        let denied = usecase
            .execute(&mallory.principal(), group.id, MessageInput::default(), None)
            .await;
        let empty = usecase
            .execute(&alice.principal(), group.id, MessageInput::default(), None)
            .await;

        // then (期待する結果):
        assert!(matches!(denied, Err(GroupError::NotAMember { .. })));
        assert_eq!(
            empty,
            Err(GroupError::Validation(ValidationError::EmptyMessage))
        );
    }
}
