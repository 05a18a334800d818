//! UseCase: ディスカッショングループ作成処理
//!
//! グループと作成者の admin メンバーシップは Repository 側でアトミックに作成される。

use std::sync::Arc;

use crate::domain::{
    Group, GroupRepository, Membership, Principal,
    validation::{CreateGroupInput, validate_new_group},
};

use super::error::GroupError;

/// グループ作成のユースケース
pub struct CreateGroupUseCase {
    groups: Arc<dyn GroupRepository>,
}

impl CreateGroupUseCase {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn execute(
        &self,
        creator: &Principal,
        input: CreateGroupInput,
    ) -> Result<(Group, Membership), GroupError> {
        let new_group = validate_new_group(input)?;
        let (group, membership) = self
            .groups
            .create_group_with_admin(creator.user_id, new_group)
            .await?;
        tracing::info!(
            "Group '{}' ({}) created by '{}'",
            group.name.as_str(),
            group.id,
            creator.username
        );
        Ok((group, membership))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MembershipRepository, MembershipRole, RepositoryError, UserId, Username,
        repository::MockGroupRepository,
    };
    use crate::infrastructure::repository::{InMemoryStore, inmemory::test_support::new_user};
    use crate::domain::UserRepository;

    fn input(name: &str) -> CreateGroupInput {
        CreateGroupInput {
            name: name.to_string(),
            description: Some("Reading together".to_string()),
            content_item_id: 1,
            is_private: false,
        }
    }

    #[tokio::test]
    async fn test_create_group_makes_creator_admin() {
        // テスト項目: グループ作成者は admin メンバーになる
        // given (前提条件):
        let store = Arc::new(InMemoryStore::new());
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let usecase = CreateGroupUseCase::new(store.clone());

        // when (操作):
        let (group, membership) = usecase
            .execute(&alice.principal(), input("BookClub"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(membership.role, MembershipRole::Admin);
        let stored = store.find_membership(alice.id, group.id).await.unwrap();
        assert_eq!(stored.map(|m| m.role), Some(MembershipRole::Admin));
    }

    #[tokio::test]
    async fn test_create_group_duplicate_name_is_conflict() {
        // テスト項目: 同じ作成者の同名グループは Conflict になる
        // given (前提条件):
        let mut groups = MockGroupRepository::new();
        groups
            .expect_create_group_with_admin()
            .returning(|_, g| Err(RepositoryError::DuplicateGroupName(g.name.into_string())));
        let usecase = CreateGroupUseCase::new(Arc::new(groups));
        let creator = Principal {
            user_id: UserId::new(1),
            username: Username::new("alice".to_string()).unwrap(),
            full_name: "alice".to_string(),
        };

        // when (操作):
        let result = usecase.execute(&creator, input("BookClub")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(GroupError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_group_blank_name_is_rejected_before_persistence() {
        // テスト項目: 空のグループ名は永続化の前に検証エラーになる
        // given (前提条件):
        let mut groups = MockGroupRepository::new();
        groups.expect_create_group_with_admin().never();
        let usecase = CreateGroupUseCase::new(Arc::new(groups));
        let creator = Principal {
            user_id: UserId::new(1),
            username: Username::new("alice".to_string()).unwrap(),
            full_name: "alice".to_string(),
        };

        // when (操作):
        let result = usecase.execute(&creator, input("   ")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(GroupError::Validation(_))));
    }
}
