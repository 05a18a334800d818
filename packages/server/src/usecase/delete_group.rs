//! UseCase: グループ削除処理（admin のみ）
//!
//! メンバーシップとメッセージは Repository 側でカスケード削除される。

use std::sync::Arc;

use crate::domain::{GroupId, GroupRepository, MembershipRole, Principal};

use super::{error::GroupError, membership_oracle::MembershipOracle};

/// グループ削除のユースケース
pub struct DeleteGroupUseCase {
    groups: Arc<dyn GroupRepository>,
    oracle: Arc<MembershipOracle>,
}

impl DeleteGroupUseCase {
    pub fn new(groups: Arc<dyn GroupRepository>, oracle: Arc<MembershipOracle>) -> Self {
        Self { groups, oracle }
    }

    pub async fn execute(&self, actor: &Principal, group_id: GroupId) -> Result<(), GroupError> {
        self.groups.get_group(group_id).await?;
        if self.oracle.role_of(actor.user_id, group_id).await != Some(MembershipRole::Admin) {
            return Err(GroupError::NotAdmin {
                user_id: actor.user_id,
                group_id,
            });
        }
        self.groups.delete_group(group_id).await?;
        tracing::info!("Group {} deleted by '{}'", group_id, actor.username);
        Ok(())
    }
}
