//! プロセス内の RoomRegistry 実装
//!
//! ## 責務
//!
//! - グループ ID ごとに接続中コネクションの `UnboundedSender` を管理
//! - ルーム内の全コネクションへのブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、イベントの配信にのみ使用します。
//! 送信はノンブロッキングなので、ロックを保持したまま await することはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{ChatEvent, ConnectionId, GroupId, RoomConnection, RoomRegistry, UserId};

type Rooms = HashMap<GroupId, HashMap<ConnectionId, RoomConnection>>;

/// Drop `user_id`'s connections from one room, notifying each.
fn evict_from_room(
    group_id: GroupId,
    room: &mut HashMap<ConnectionId, RoomConnection>,
    user_id: UserId,
    evicted: &Arc<ChatEvent>,
) -> usize {
    let mut removed = 0;
    room.retain(|_, connection| {
        if connection.user_id != user_id {
            return true;
        }
        if connection.sender.send(evicted.clone()).is_err() {
            tracing::debug!("Connection '{}' already closed", connection.id);
        }
        tracing::info!(
            "Evicted connection '{}' of user {} from room {}",
            connection.id,
            user_id,
            group_id
        );
        removed += 1;
        false
    });
    removed
}

/// プロセス内 RoomRegistry
///
/// ブロードキャストは読み取りロック、参加・退出は書き込みロックを取るため、
/// ブロードキャストが変更途中のルームを観測することはありません。
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    rooms: RwLock<Rooms>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, group_id: GroupId, connection: RoomConnection) -> bool {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(group_id).or_default();
        if room.contains_key(&connection.id) {
            return false;
        }
        tracing::debug!(
            "Connection '{}' (user {}) joined room {}",
            connection.id,
            connection.user_id,
            group_id
        );
        room.insert(connection.id, connection);
        true
    }

    async fn leave(&self, group_id: GroupId, connection_id: ConnectionId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(room) = rooms.get_mut(&group_id) else {
            return false;
        };
        let removed = room.remove(&connection_id).is_some();
        if room.is_empty() {
            rooms.remove(&group_id);
        }
        if removed {
            tracing::debug!("Connection '{}' left room {}", connection_id, group_id);
        }
        removed
    }

    async fn broadcast(&self, group_id: GroupId, event: ChatEvent) -> usize {
        let rooms = self.rooms.read().await;
        let Some(room) = rooms.get(&group_id) else {
            return 0;
        };

        let event = Arc::new(event);
        let mut delivered = 0;
        for connection in room.values() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = connection.sender.send(event.clone()) {
                tracing::warn!(
                    "Failed to push event to connection '{}' in room {}: {}",
                    connection.id,
                    group_id,
                    e
                );
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Broadcasted event to {} connection(s) in room {}", delivered, group_id);
        delivered
    }

    async fn count(&self, group_id: GroupId) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(&group_id).map_or(0, HashMap::len)
    }

    async fn evict_user(&self, group_id: GroupId, user_id: UserId) -> usize {
        let mut rooms = self.rooms.write().await;
        let Some(room) = rooms.get_mut(&group_id) else {
            return 0;
        };
        let removed = evict_from_room(group_id, room, user_id, &Arc::new(ChatEvent::Evicted));
        if room.is_empty() {
            rooms.remove(&group_id);
        }
        removed
    }

    async fn evict_user_everywhere(&self, user_id: UserId) -> usize {
        let mut rooms = self.rooms.write().await;
        let evicted = Arc::new(ChatEvent::Evicted);
        let mut removed = 0;
        for (group_id, room) in rooms.iter_mut() {
            removed += evict_from_room(*group_id, room, user_id, &evicted);
        }
        rooms.retain(|_, room| !room.is_empty());
        removed
    }
}
