use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::{
    GroupId, Membership, MembershipRepository, MembershipRole, RepositoryError, UserId,
};

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn find_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Option<Membership>, RepositoryError> {
        let state = self.state.lock().await;
        state.ensure_group(group_id)?;
        Ok(state.memberships.get(&(group_id, user_id)).cloned())
    }

    async fn add_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
        role: MembershipRole,
    ) -> Result<Membership, RepositoryError> {
        let mut state = self.state.lock().await;
        state.ensure_group(group_id)?;
        state.user(user_id)?;
        if state.memberships.contains_key(&(group_id, user_id)) {
            return Err(RepositoryError::DuplicateMembership { user_id, group_id });
        }

        let membership = Membership {
            user_id,
            group_id,
            role,
            joined_at: self.now(),
        };
        state
            .memberships
            .insert((group_id, user_id), membership.clone());
        tracing::debug!(
            "User {} joined group {} as {}",
            user_id,
            group_id,
            role.as_str()
        );

        Ok(membership)
    }

    async fn remove_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        state.ensure_group(group_id)?;
        let Some(membership) = state.memberships.get(&(group_id, user_id)) else {
            return Ok(false);
        };
        if membership.role == MembershipRole::Admin
            && !state.memberships.iter().any(|((g, u), m)| {
                *g == group_id && *u != user_id && m.role == MembershipRole::Admin
            })
        {
            return Err(RepositoryError::LastAdmin { user_id, group_id });
        }
        state.memberships.remove(&(group_id, user_id));
        Ok(true)
    }

    async fn list_members(&self, group_id: GroupId) -> Result<Vec<Membership>, RepositoryError> {
        let state = self.state.lock().await;
        state.ensure_group(group_id)?;
        let mut members: Vec<Membership> = state
            .memberships
            .range((group_id, UserId::new(i64::MIN))..=(group_id, UserId::new(i64::MAX)))
            .map(|(_, m)| m.clone())
            .collect();
        members.sort_by_key(|m| (m.joined_at, m.user_id));
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRepository;
    use crate::infrastructure::repository::inmemory::test_support::{new_user, store_with_group};

    #[tokio::test]
    async fn test_add_membership_success() {
        // テスト項目: ユーザーを member としてグループに追加できる
        // given (前提条件):
        let (store, _alice, group) = store_with_group(1000).await;
        let bob = store.create_user(new_user("bob")).await.unwrap();

        // when (操作):
        let membership = store
            .add_membership(bob.id, group.id, MembershipRole::Member)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(membership.role, MembershipRole::Member);
        assert_eq!(store.list_members(group.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_membership_duplicate() {
        // テスト項目: 同じユーザーとグループの組み合わせは 1 件のみ
        // given (前提条件):
        let (store, alice, group) = store_with_group(1000).await;

        // when (操作):
        let result = store
            .add_membership(alice.id, group.id, MembershipRole::Member)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateMembership {
                user_id: alice.id,
                group_id: group.id
            })
        );
    }

    #[tokio::test]
    async fn test_find_membership_for_non_member_and_missing_group() {
        // テスト項目: メンバーでない場合は None、グループが無い場合は GroupNotFound
        // given (前提条件):
        let (store, _alice, group) = store_with_group(1000).await;
        let bob = store.create_user(new_user("bob")).await.unwrap();

        // when (操作):
        let non_member = store.find_membership(bob.id, group.id).await;
        let missing = store.find_membership(bob.id, GroupId::new(99)).await;

        // then (期待する結果):
        assert_eq!(non_member, Ok(None));
        assert_eq!(missing, Err(RepositoryError::GroupNotFound(GroupId::new(99))));
    }

    #[tokio::test]
    async fn test_remove_membership_is_idempotent() {
        // テスト項目: メンバーシップ削除は 2 回目以降 false を返す
        // given (前提条件):
        let (store, _alice, group) = store_with_group(1000).await;
        let bob = store.create_user(new_user("bob")).await.unwrap();
        store
            .add_membership(bob.id, group.id, MembershipRole::Member)
            .await
            .unwrap();

        // when (操作):
        let first = store.remove_membership(bob.id, group.id).await.unwrap();
        let second = store.remove_membership(bob.id, group.id).await.unwrap();

        // then (期待する結果):
        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn test_remove_last_admin_is_refused() {
        // テスト項目: 最後の admin のメンバーシップは削除できず、他に admin がいれば削除できる
        // given (前提条件):
        let (store, alice, group) = store_with_group(1000).await;
        let bob = store.create_user(new_user("bob")).await.unwrap();

        // when (操作):
        let sole_admin = store.remove_membership(alice.id, group.id).await;
        store
            .add_membership(bob.id, group.id, MembershipRole::Admin)
            .await
            .unwrap();
        let with_second_admin = store.remove_membership(alice.id, group.id).await;

        // then (期待する結果):
        assert_eq!(
            sole_admin,
            Err(RepositoryError::LastAdmin {
                user_id: alice.id,
                group_id: group.id
            })
        );
        assert_eq!(with_second_admin, Ok(true));
        assert!(store.find_membership(alice.id, group.id).await.unwrap().is_none());
    }
}
