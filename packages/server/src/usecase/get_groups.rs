//! UseCase: グループ一覧・詳細の取得
//!
//! 非公開グループはメンバーにのみ見える。

use std::sync::Arc;

use crate::domain::{
    Group, GroupId, GroupRepository, Membership, MembershipRepository, Principal, RoomRegistry,
};

use super::{error::GroupError, membership_oracle::MembershipOracle};

/// グループ詳細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetail {
    pub group: Group,
    pub members: Vec<Membership>,
    /// ルームに接続中のコネクション数
    pub online: usize,
}

/// グループ一覧取得のユースケース
pub struct GetGroupsUseCase {
    groups: Arc<dyn GroupRepository>,
    oracle: Arc<MembershipOracle>,
}

impl GetGroupsUseCase {
    pub fn new(groups: Arc<dyn GroupRepository>, oracle: Arc<MembershipOracle>) -> Self {
        Self { groups, oracle }
    }

    /// 閲覧者に見えるグループを作成日時の降順で返す
    pub async fn execute(&self, viewer: Option<&Principal>) -> Result<Vec<Group>, GroupError> {
        let groups = self.groups.list_groups().await?;
        let mut visible = Vec::with_capacity(groups.len());
        for group in groups {
            if can_view(&self.oracle, viewer, &group).await {
                visible.push(group);
            }
        }
        Ok(visible)
    }
}

/// グループ詳細取得のユースケース
pub struct GetGroupDetailUseCase {
    groups: Arc<dyn GroupRepository>,
    memberships: Arc<dyn MembershipRepository>,
    oracle: Arc<MembershipOracle>,
    registry: Arc<dyn RoomRegistry>,
}

impl GetGroupDetailUseCase {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        memberships: Arc<dyn MembershipRepository>,
        oracle: Arc<MembershipOracle>,
        registry: Arc<dyn RoomRegistry>,
    ) -> Self {
        Self {
            groups,
            memberships,
            oracle,
            registry,
        }
    }

    /// 見えないグループは存在しないものとして `NotFound` を返す
    pub async fn execute(
        &self,
        viewer: Option<&Principal>,
        group_id: GroupId,
    ) -> Result<GroupDetail, GroupError> {
        let group = self.groups.get_group(group_id).await?;
        if !can_view(&self.oracle, viewer, &group).await {
            return Err(GroupError::NotFound(group_id));
        }
        let members = self.memberships.list_members(group_id).await?;
        let online = self.registry.count(group_id).await;
        Ok(GroupDetail {
            group,
            members,
            online,
        })
    }
}

async fn can_view(oracle: &MembershipOracle, viewer: Option<&Principal>, group: &Group) -> bool {
    if !group.is_private {
        return true;
    }
    match viewer {
        Some(viewer) => oracle.is_member(viewer.user_id, group.id).await,
        None => false,
    }
}
