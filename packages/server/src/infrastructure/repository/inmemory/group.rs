use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::{
    Group, GroupId, GroupRepository, Membership, MembershipRole, NewGroup, RepositoryError,
    UserId,
};

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn create_group_with_admin(
        &self,
        creator: UserId,
        new_group: NewGroup,
    ) -> Result<(Group, Membership), RepositoryError> {
        let mut state = self.state.lock().await;

        // 全ての検証を書き込み前に行い、どちらか片方だけ残ることはない
        state.user(creator)?;
        if state
            .groups
            .values()
            .any(|g| g.creator == Some(creator) && g.name == new_group.name)
        {
            return Err(RepositoryError::DuplicateGroupName(
                new_group.name.into_string(),
            ));
        }

        let id = GroupId::new(state.next_group_id);
        state.next_group_id += 1;
        let now = self.now();

        let group = Group {
            id,
            name: new_group.name,
            description: new_group.description,
            content_item_id: new_group.content_item_id,
            is_private: new_group.is_private,
            created_at: now,
            creator: Some(creator),
        };
        let membership = Membership {
            user_id: creator,
            group_id: id,
            role: MembershipRole::Admin,
            joined_at: now,
        };
        state.groups.insert(id, group.clone());
        state.memberships.insert((id, creator), membership.clone());
        tracing::debug!("Group '{}' ({}) created by user {}", group.name.as_str(), id, creator);

        Ok((group, membership))
    }

    async fn get_group(&self, group_id: GroupId) -> Result<Group, RepositoryError> {
        let state = self.state.lock().await;
        state.ensure_group(group_id).cloned()
    }

    async fn list_groups(&self) -> Result<Vec<Group>, RepositoryError> {
        let state = self.state.lock().await;
        let mut groups: Vec<Group> = state.groups.values().cloned().collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(groups)
    }

    async fn delete_group(&self, group_id: GroupId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        state.ensure_group(group_id)?;
        state.remove_group_cascade(group_id);
        tracing::debug!("Group {} deleted", group_id);
        Ok(())
    }
}
