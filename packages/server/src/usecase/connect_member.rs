//! UseCase: ルームへの参加処理
//!
//! 認証済みのプリンシパルについてメンバーシップを確認し、
//! メンバーである場合にのみコネクションを Room Registry に登録する。

use std::sync::Arc;

use crate::domain::{GroupId, Principal, RoomConnection, RoomRegistry};

use super::{error::ConnectError, membership_oracle::MembershipOracle};

/// ルーム参加のユースケース
pub struct ConnectMemberUseCase {
    oracle: Arc<MembershipOracle>,
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectMemberUseCase {
    pub fn new(oracle: Arc<MembershipOracle>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self { oracle, registry }
    }

    /// ルーム参加を実行
    ///
    /// メンバーでない場合は Registry に一切触れずに `NotAMember` を返す。
    pub async fn execute(
        &self,
        principal: &Principal,
        group_id: GroupId,
        connection: RoomConnection,
    ) -> Result<(), ConnectError> {
        if !self.oracle.is_member(principal.user_id, group_id).await {
            return Err(ConnectError::NotAMember {
                user_id: principal.user_id,
                group_id,
            });
        }

        let connection_id = connection.id;
        if !self.registry.join(group_id, connection).await {
            tracing::debug!(
                "Connection '{}' was already registered in room {}",
                connection_id,
                group_id
            );
        }
        Ok(())
    }
}
