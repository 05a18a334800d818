//! Room Registry trait 定義
//!
//! グループ ID ごとに接続中のコネクション集合を管理し、ブロードキャストを行う。
//! UseCase 層はこの trait に依存し、配信基盤（プロセス内チャンネル、
//! 外部メッセージバスなど）の具体的な実装には依存しない。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    event::ChatEvent,
    value_object::{ConnectionId, GroupId, UserId},
};

/// Channel the registry pushes events into; drained by the connection's
/// outbound loop.
pub type PusherChannel = mpsc::UnboundedSender<Arc<ChatEvent>>;

/// Handle of a live connection as stored in a room
#[derive(Debug, Clone)]
pub struct RoomConnection {
    pub id: ConnectionId,
    pub user_id: UserId,
    pub sender: PusherChannel,
}

/// Room Registry trait
///
/// All operations are internally synchronized: a broadcast sees the room as
/// it was at call time, never a set that is mid-mutation.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add the connection to the group's room.
    ///
    /// Idempotent: returns `false` if the connection id was already present.
    async fn join(&self, group_id: GroupId, connection: RoomConnection) -> bool;

    /// Remove the connection from the group's room.
    ///
    /// Idempotent and safe for connections that never joined: returns
    /// whether something was removed.
    async fn leave(&self, group_id: GroupId, connection_id: ConnectionId) -> bool;

    /// Deliver `event` to every connection registered for the group.
    ///
    /// Closed connections are skipped without affecting the others.
    /// Returns the number of connections the event was handed to.
    async fn broadcast(&self, group_id: GroupId, event: ChatEvent) -> usize;

    /// Number of live connections in the group's room
    async fn count(&self, group_id: GroupId) -> usize;

    /// Remove every connection of `user_id` from the group's room and push
    /// [`ChatEvent::Evicted`] to each. Returns the number removed.
    async fn evict_user(&self, group_id: GroupId, user_id: UserId) -> usize;

    /// Same as [`RoomRegistry::evict_user`] across every room.
    async fn evict_user_everywhere(&self, user_id: UserId) -> usize;
}
