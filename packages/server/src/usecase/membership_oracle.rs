//! Membership Oracle
//!
//! 「ユーザー U はグループ G のメンバーか」に答える唯一の認可ゲート。
//! WebSocket 接続・HTTP の履歴取得・HTTP のメッセージ投稿の全てがここを通る。
//!
//! 判定はフェイルクローズ：グループが存在しない・メンバーシップが無い・
//! 検索に失敗した、のいずれも「メンバーではない」として扱い、
//! 呼び出し元にエラーを返さない。

use std::sync::Arc;

use crate::domain::{
    Group, GroupId, GroupRepository, MembershipRepository, MembershipRole, RepositoryError, UserId,
};

use super::error::GroupError;

pub struct MembershipOracle {
    memberships: Arc<dyn MembershipRepository>,
}

impl MembershipOracle {
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// `user_id` が `group_id` のメンバーかを判定
    pub async fn is_member(&self, user_id: UserId, group_id: GroupId) -> bool {
        self.role_of(user_id, group_id).await.is_some()
    }

    /// メンバーであればそのロールを返す
    pub async fn role_of(&self, user_id: UserId, group_id: GroupId) -> Option<MembershipRole> {
        match self.memberships.find_membership(user_id, group_id).await {
            Ok(membership) => membership.map(|m| m.role),
            Err(RepositoryError::GroupNotFound(_)) => {
                tracing::debug!("Membership check for missing group {}", group_id);
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Membership lookup failed for user {} in group {}: {}",
                    user_id,
                    group_id,
                    e
                );
                None
            }
        }
    }
}

/// グループの存在とメンバーシップを確認する（HTTP 経路用）
///
/// グループが無ければ `NotFound`、メンバーでなければ `NotAMember`。
pub(crate) async fn require_member(
    groups: &dyn GroupRepository,
    oracle: &MembershipOracle,
    user_id: UserId,
    group_id: GroupId,
) -> Result<Group, GroupError> {
    let group = groups.get_group(group_id).await?;
    if !oracle.is_member(user_id, group_id).await {
        return Err(GroupError::NotAMember { user_id, group_id });
    }
    Ok(group)
}
