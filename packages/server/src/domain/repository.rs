//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## ライフサイクル規則
//!
//! 実装は以下の規則を永続化の境界で保証する必要があります：
//!
//! - グループ作成と作成者の admin メンバーシップ作成はアトミック
//! - グループ削除 → メンバーシップとチャットメッセージも削除
//! - ユーザー削除 → メンバーシップとチャットメッセージを削除し、
//!   作成したグループの `creator` を `None` にする

use async_trait::async_trait;

use super::{
    entity::{
        ChatMessage, Group, Membership, MembershipRole, NewChatMessage, NewGroup, NewUser,
        ProfileUpdate, User,
    },
    error::RepositoryError,
    value_object::{AccessToken, GroupId, UserId},
};

/// User Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成（ユーザー名は一意）
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// ユーザーを取得
    async fn get_user(&self, user_id: UserId) -> Result<User, RepositoryError>;

    /// ユーザー名からユーザーを検索
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// プロフィール（姓名・自己紹介）を更新し、更新後のユーザーを返す
    async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, RepositoryError>;

    /// アクセストークンからユーザーを検索
    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<User>, RepositoryError>;

    /// ユーザーを削除（カスケード規則はモジュールドキュメント参照）
    async fn delete_user(&self, user_id: UserId) -> Result<(), RepositoryError>;
}

/// Group Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// グループと作成者の admin メンバーシップをアトミックに作成
    ///
    /// (creator, name) が重複する場合は `DuplicateGroupName`。
    /// 失敗時はどちらも永続化されない。
    async fn create_group_with_admin(
        &self,
        creator: UserId,
        new_group: NewGroup,
    ) -> Result<(Group, Membership), RepositoryError>;

    /// グループを取得
    async fn get_group(&self, group_id: GroupId) -> Result<Group, RepositoryError>;

    /// 全グループを作成日時の降順で取得
    async fn list_groups(&self) -> Result<Vec<Group>, RepositoryError>;

    /// グループを削除（メンバーシップとメッセージもカスケード削除）
    async fn delete_group(&self, group_id: GroupId) -> Result<(), RepositoryError>;
}

/// Membership Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// メンバーシップを検索
    ///
    /// グループが存在しない場合は `GroupNotFound`、
    /// メンバーでない場合は `Ok(None)`。
    async fn find_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Option<Membership>, RepositoryError>;

    /// メンバーシップを追加（(user, group) ごとに最大 1 件）
    async fn add_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
        role: MembershipRole,
    ) -> Result<Membership, RepositoryError>;

    /// メンバーシップを削除。削除した場合は `true`
    ///
    /// グループ最後の admin は削除できない（`LastAdmin`）。
    async fn remove_membership(
        &self,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<bool, RepositoryError>;

    /// グループのメンバー一覧を参加日時の昇順で取得
    async fn list_members(&self, group_id: GroupId) -> Result<Vec<Membership>, RepositoryError>;
}

/// Message Store trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを永続化し、採番された ID とタイムスタンプ付きで返す
    ///
    /// グループが存在しない場合は `GroupNotFound`。
    async fn append(
        &self,
        sender: UserId,
        group_id: GroupId,
        message: NewChatMessage,
    ) -> Result<ChatMessage, RepositoryError>;

    /// グループのメッセージを作成日時の昇順で取得（呼び出し時点のスナップショット）
    async fn list_by_group(&self, group_id: GroupId) -> Result<Vec<ChatMessage>, RepositoryError>;
}
