//! InMemory Repository 実装
//!
//! ドメイン層が定義する Repository trait 群の具体的な実装。
//! 全テーブルを 1 つの `Mutex` の下に置くことで、グループ作成と admin
//! メンバーシップの同時作成、およびカスケード削除をアトミックに行います。

mod group;
mod membership;
mod message;
mod user;

use std::{collections::BTreeMap, sync::Arc};

use bookhaven_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, Group, GroupId, Membership, RepositoryError, Timestamp, User, UserId,
};

/// インメモリストア
///
/// `UserRepository` / `GroupRepository` / `MembershipRepository` /
/// `MessageStore` を全て実装します。ID は 1 から採番されます。
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    /// Key: (group, user)
    memberships: BTreeMap<(GroupId, UserId), Membership>,
    /// Key: message id (ascending = append order)
    messages: BTreeMap<i64, ChatMessage>,
    next_user_id: i64,
    next_group_id: i64,
    next_message_id: i64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            memberships: BTreeMap::new(),
            messages: BTreeMap::new(),
            next_user_id: 1,
            next_group_id: 1,
            next_message_id: 1,
        }
    }
}

impl StoreState {
    fn user(&self, user_id: UserId) -> Result<&User, RepositoryError> {
        self.users
            .get(&user_id)
            .ok_or(RepositoryError::UserNotFound(user_id))
    }

    fn ensure_group(&self, group_id: GroupId) -> Result<&Group, RepositoryError> {
        self.groups
            .get(&group_id)
            .ok_or(RepositoryError::GroupNotFound(group_id))
    }

    fn remove_group_cascade(&mut self, group_id: GroupId) {
        self.groups.remove(&group_id);
        self.memberships.retain(|(g, _), _| *g != group_id);
        self.messages.retain(|_, m| m.group_id != group_id);
    }

    fn remove_user_cascade(&mut self, user_id: UserId) {
        self.users.remove(&user_id);
        self.memberships.retain(|(_, u), _| *u != user_id);
        self.messages.retain(|_, m| m.sender != user_id);
        for group in self.groups.values_mut() {
            if group.creator == Some(user_id) {
                group.creator = None;
            }
        }
    }
}

impl InMemoryStore {
    /// システム時計を使うストアを作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 時計を指定してストアを作成（テスト用）
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
