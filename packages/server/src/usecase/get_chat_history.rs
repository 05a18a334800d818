//! UseCase: チャット履歴の取得（メンバーのみ）

use std::{collections::HashMap, sync::Arc};

use crate::domain::{
    GroupId, GroupRepository, MessageReceived, MessageStore, Principal, UserId, UserRepository,
};

use super::{
    error::GroupError,
    membership_oracle::{MembershipOracle, require_member},
};

/// チャット履歴取得のユースケース
pub struct GetChatHistoryUseCase {
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    messages: Arc<dyn MessageStore>,
    oracle: Arc<MembershipOracle>,
}

impl GetChatHistoryUseCase {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        messages: Arc<dyn MessageStore>,
        oracle: Arc<MembershipOracle>,
    ) -> Self {
        Self {
            groups,
            users,
            messages,
            oracle,
        }
    }

    /// 履歴を古い順に返す。送信者の表示名は呼び出し時点のもの。
    pub async fn execute(
        &self,
        viewer: &Principal,
        group_id: GroupId,
    ) -> Result<Vec<MessageReceived>, GroupError> {
        require_member(self.groups.as_ref(), &self.oracle, viewer.user_id, group_id).await?;

        let messages = self.messages.list_by_group(group_id).await?;
        let mut senders: HashMap<UserId, Principal> = HashMap::new();
        let mut history = Vec::with_capacity(messages.len());
        for message in &messages {
            if !senders.contains_key(&message.sender) {
                let user = self.users.get_user(message.sender).await?;
                senders.insert(message.sender, user.principal());
            }
            if let Some(sender) = senders.get(&message.sender) {
                history.push(MessageReceived::new(message, sender, None));
            }
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MembershipRepository, MembershipRole, MessageText, NewChatMessage},
        infrastructure::repository::inmemory::test_support::{new_user, store_with_group},
    };

    #[tokio::test]
    async fn test_history_in_order_with_sender_names() {
        // テスト項目: 履歴が古い順に送信者名付きで返される
        // given (前提条件):
        let (store, alice, group) = store_with_group(1000).await;
        let store = Arc::new(store);
        let bob = store.create_user(new_user("bob")).await.unwrap();
        store
            .add_membership(bob.id, group.id, MembershipRole::Member)
            .await
            .unwrap();
        for (sender, text) in [(alice.id, "first"), (bob.id, "second")] {
            store
                .append(
                    sender,
                    group.id,
                    NewChatMessage::text(MessageText::new(text.to_string()).unwrap()),
                )
                .await
                .unwrap();
        }
        let oracle = Arc::new(MembershipOracle::new(store.clone()));
        let usecase =
            GetChatHistoryUseCase::new(store.clone(), store.clone(), store.clone(), oracle);

        // when (操作):
        let history = usecase.execute(&bob.principal(), group.id).await.unwrap();

        // then (期待する結果):
        let rows: Vec<(&str, &str)> = history
            .iter()
            .map(|m| (m.sender.username.as_str(), m.text.as_str()))
            .collect();
        assert_eq!(rows, vec![("alice", "first"), ("bob", "second")]);
    }

    #[tokio::test]
    async fn test_history_requires_membership() {
        // テスト項目: 非メンバーは履歴を取得できず、存在しないグループは NotFound
        // given (前提条件):
        let (store, _alice, group) = store_with_group(1000).await;
        let store = Arc::new(store);
        let mallory = store.create_user(new_user("mallory")).await.unwrap();
        let oracle = Arc::new(MembershipOracle::new(store.clone()));
        let usecase =
            GetChatHistoryUseCase::new(store.clone(), store.clone(), store.clone(), oracle);

        // when (操作):
        let denied = usecase.execute(&mallory.principal(), group.id).await;
        let missing = usecase.execute(&mallory.principal(), GroupId::new(99)).await;

        // then (期待する結果):
        assert!(matches!(denied, Err(GroupError::NotAMember { .. })));
        assert_eq!(missing, Err(GroupError::NotFound(GroupId::new(99))));
    }
}
