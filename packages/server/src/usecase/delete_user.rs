//! UseCase: ユーザー削除処理
//!
//! メンバーシップとメッセージは削除され、作成したグループは作成者なしで残る。
//! 開いている接続は全てのルームから外され、閉じられる。

use std::sync::Arc;

use crate::domain::{RoomRegistry, UserId, UserRepository};

use super::error::UserError;

/// ユーザー削除のユースケース
pub struct DeleteUserUseCase {
    users: Arc<dyn UserRepository>,
    registry: Arc<dyn RoomRegistry>,
}

impl DeleteUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self { users, registry }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<(), UserError> {
        self.users.delete_user(user_id).await?;
        let evicted = self.registry.evict_user_everywhere(user_id).await;
        tracing::info!(
            "User {} deleted ({} live connection(s) closed)",
            user_id,
            evicted
        );
        Ok(())
    }
}
