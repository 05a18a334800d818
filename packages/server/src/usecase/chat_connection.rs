//! チャット接続のステートマシン
//!
//! ```text
//! Connecting ──認証成功──▶ Authenticated ──メンバー確認──▶ Joined ──切断──▶ Closed
//!      │                        │
//!      └──認証失敗──────────────┴──非メンバー──────────────────────────────▶ Closed
//! ```
//!
//! - 認証・メンバーシップの失敗はワイヤ上のエラーを返さずに閉じる
//! - Joined の間、受信イベントは 1 件ずつ到着順に処理される
//! - エラー応答は Registry を経由せず、自身の送信チャンネルにのみ積む
//! - `close` は何度呼んでも退出処理を 1 回だけ行う

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, CorrelationId, GroupId, IdentityProvider, InboundChatEvent,
    MessageError, MessageId, Principal, PusherChannel, RoomConnection,
    validation::MessageInput,
};

use super::{
    connect_member::ConnectMemberUseCase, disconnect_member::DisconnectMemberUseCase,
    error::{ConnectError, SendMessageError}, send_message::SendMessageUseCase,
};

/// 空メッセージに相関 ID が付いていた場合の応答
pub const EMPTY_MESSAGE_ERROR: &str = "Message could not be processed.";
/// 永続化に失敗した場合の応答
pub const PERSISTENCE_ERROR: &str = "Message could not be saved.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Authenticated,
    Joined,
    Closed,
}

/// 受信イベント 1 件の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundOutcome {
    /// 保存してルームにブロードキャストした
    Broadcast(MessageId),
    /// 送信元にエラーを返した
    Rejected,
    /// 何もしなかった
    Ignored,
}

/// 接続が使うサービス群
#[derive(Clone)]
pub struct ChatServices {
    pub identity: Arc<dyn IdentityProvider>,
    pub connect_member: Arc<ConnectMemberUseCase>,
    pub disconnect_member: Arc<DisconnectMemberUseCase>,
    pub send_message: Arc<SendMessageUseCase>,
}

/// 1 本の WebSocket 接続
pub struct ChatConnection {
    id: ConnectionId,
    group_id: GroupId,
    state: ConnectionState,
    principal: Option<Principal>,
    /// この接続の送信チャンネル（ブロードキャストとエラー応答の両方が流れる）
    outbound: PusherChannel,
    services: ChatServices,
}

impl ChatConnection {
    pub fn new(services: ChatServices, group_id: GroupId, outbound: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            group_id,
            state: ConnectionState::Connecting,
            principal: None,
            outbound,
            services,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// 認証とメンバーシップ確認を行い、ルームに参加する
    ///
    /// 失敗した場合は `Closed` に遷移する。
    pub async fn open(&mut self, credential: Option<&str>) -> Result<&Principal, ConnectError> {
        match self.state {
            ConnectionState::Connecting => {}
            ConnectionState::Closed => return Err(ConnectError::Closed),
            ConnectionState::Authenticated | ConnectionState::Joined => {
                return self.principal.as_ref().ok_or(ConnectError::AuthenticationMissing);
            }
        }

        // Connecting → Authenticated
        let principal = match credential {
            Some(credential) => self.services.identity.authenticate(credential).await,
            None => None,
        };
        let Some(principal) = principal else {
            tracing::info!(
                "Connection '{}' to group {} has no identity, closing",
                self.id,
                self.group_id
            );
            self.state = ConnectionState::Closed;
            return Err(ConnectError::AuthenticationMissing);
        };
        self.state = ConnectionState::Authenticated;

        // Authenticated → Joined
        let connection = RoomConnection {
            id: self.id,
            user_id: principal.user_id,
            sender: self.outbound.clone(),
        };
        if let Err(e) = self
            .services
            .connect_member
            .execute(&principal, self.group_id, connection)
            .await
        {
            tracing::info!("Connection '{}' rejected: {}", self.id, e);
            self.state = ConnectionState::Closed;
            return Err(e);
        }

        tracing::info!(
            "User '{}' joined group {} on connection '{}'",
            principal.username,
            self.group_id,
            self.id
        );
        self.state = ConnectionState::Joined;
        Ok(&*self.principal.insert(principal))
    }

    /// 受信イベントを 1 件処理する
    pub async fn handle_inbound(&self, event: InboundChatEvent) -> InboundOutcome {
        let (ConnectionState::Joined, Some(principal)) = (self.state, self.principal.as_ref())
        else {
            tracing::debug!("Connection '{}' is not joined, dropping event", self.id);
            return InboundOutcome::Ignored;
        };

        let temp_id = event.temp_id;
        let input = MessageInput {
            text: event.text,
            attachment: None,
        };
        match self
            .services
            .send_message
            .execute(principal, self.group_id, input, temp_id.clone())
            .await
        {
            Ok(received) => InboundOutcome::Broadcast(received.message_id),
            Err(SendMessageError::EmptyMessage) => {
                if temp_id.is_some() {
                    self.reply_error(temp_id, EMPTY_MESSAGE_ERROR.to_string());
                    InboundOutcome::Rejected
                } else {
                    tracing::debug!("Ignoring empty message on connection '{}'", self.id);
                    InboundOutcome::Ignored
                }
            }
            Err(SendMessageError::Validation(e)) => {
                tracing::info!("Rejected message on connection '{}': {}", self.id, e);
                self.reply_error(temp_id, e.to_string());
                InboundOutcome::Rejected
            }
            Err(SendMessageError::Persistence(e)) => {
                tracing::warn!(
                    "Failed to persist message from user {} in group {}: {}",
                    principal.user_id,
                    self.group_id,
                    e
                );
                self.reply_error(temp_id, PERSISTENCE_ERROR.to_string());
                InboundOutcome::Rejected
            }
        }
    }

    /// 接続を閉じる
    ///
    /// Joined からの遷移時のみルームから退出する。2 回目以降は何もせず `false`。
    pub async fn close(&mut self) -> bool {
        let previous = std::mem::replace(&mut self.state, ConnectionState::Closed);
        match previous {
            ConnectionState::Closed => false,
            ConnectionState::Joined => {
                self.services
                    .disconnect_member
                    .execute(self.group_id, self.id)
                    .await;
                tracing::info!(
                    "Connection '{}' left group {}",
                    self.id,
                    self.group_id
                );
                true
            }
            ConnectionState::Connecting | ConnectionState::Authenticated => true,
        }
    }

    fn reply_error(&self, temp_id: Option<CorrelationId>, error: String) {
        let event = ChatEvent::MessageError(MessageError { temp_id, error });
        if self.outbound.send(Arc::new(event)).is_err() {
            tracing::debug!(
                "Connection '{}' outbound channel closed, dropping error reply",
                self.id
            );
        }
    }
}
