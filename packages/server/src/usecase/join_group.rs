//! UseCase: グループへの参加・退出
//!
//! - 公開グループには誰でも member として参加できる
//! - 非公開グループへの追加、他のユーザーの追加は admin のみ
//! - 最後の admin は退出できない
//! - 退出したユーザーの接続はルームから外され、閉じられる

use std::sync::Arc;

use crate::domain::{
    GroupId, GroupRepository, Membership, MembershipRepository, MembershipRole, Principal,
    RoomRegistry, UserId,
};

use super::{error::GroupError, membership_oracle::MembershipOracle};

/// グループ参加のユースケース
pub struct JoinGroupUseCase {
    groups: Arc<dyn GroupRepository>,
    memberships: Arc<dyn MembershipRepository>,
    oracle: Arc<MembershipOracle>,
}

impl JoinGroupUseCase {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        memberships: Arc<dyn MembershipRepository>,
        oracle: Arc<MembershipOracle>,
    ) -> Self {
        Self {
            groups,
            memberships,
            oracle,
        }
    }

    /// `target` を省略した場合は `actor` 自身が参加する
    pub async fn execute(
        &self,
        actor: &Principal,
        group_id: GroupId,
        target: Option<UserId>,
    ) -> Result<Membership, GroupError> {
        let group = self.groups.get_group(group_id).await?;
        let target = target.unwrap_or(actor.user_id);

        if target != actor.user_id || group.is_private {
            let is_admin =
                self.oracle.role_of(actor.user_id, group_id).await == Some(MembershipRole::Admin);
            if !is_admin {
                return Err(if target == actor.user_id {
                    GroupError::PrivateGroup(group_id)
                } else {
                    GroupError::NotAdmin {
                        user_id: actor.user_id,
                        group_id,
                    }
                });
            }
        }

        let membership = self
            .memberships
            .add_membership(target, group_id, MembershipRole::Member)
            .await?;
        tracing::info!("User {} joined group {}", target, group_id);
        Ok(membership)
    }
}

/// グループ退出のユースケース
pub struct LeaveGroupUseCase {
    memberships: Arc<dyn MembershipRepository>,
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveGroupUseCase {
    pub fn new(memberships: Arc<dyn MembershipRepository>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self {
            memberships,
            registry,
        }
    }

    pub async fn execute(&self, actor: &Principal, group_id: GroupId) -> Result<(), GroupError> {
        if !self
            .memberships
            .remove_membership(actor.user_id, group_id)
            .await?
        {
            return Err(GroupError::NotAMember {
                user_id: actor.user_id,
                group_id,
            });
        }
        let evicted = self.registry.evict_user(group_id, actor.user_id).await;
        tracing::info!(
            "User {} left group {} ({} live connection(s) closed)",
            actor.user_id,
            group_id,
            evicted
        );
        Ok(())
    }
}
