//! UseCase: ルームからの退出処理

use std::sync::Arc;

use crate::domain::{ConnectionId, GroupId, RoomRegistry};

/// ルーム退出のユースケース
pub struct DisconnectMemberUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectMemberUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行
    ///
    /// 冪等：登録されていないコネクションに対しては `false` を返すだけ。
    pub async fn execute(&self, group_id: GroupId, connection_id: ConnectionId) -> bool {
        let removed = self.registry.leave(group_id, connection_id).await;
        if !removed {
            tracing::debug!(
                "Connection '{}' was not registered in room {}",
                connection_id,
                group_id
            );
        }
        removed
    }
}
