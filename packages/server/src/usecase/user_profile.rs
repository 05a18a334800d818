//! UseCase: プロフィール参照・編集
//!
//! プロフィールは誰でも参照できる。編集は本人のみで、姓名を空にすると
//! 表示名はユーザー名になる。

use std::sync::Arc;

use crate::domain::{
    User, UserId, UserRepository,
    validation::{ProfileEditInput, validate_profile_edit},
};

use super::error::UserError;

/// ユーザー名でプロフィールを取得するユースケース
pub struct GetUserProfileUseCase {
    users: Arc<dyn UserRepository>,
}

impl GetUserProfileUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, username: &str) -> Result<User, UserError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::UsernameNotFound(username.to_string()))
    }

    pub async fn by_id(&self, user_id: UserId) -> Result<User, UserError> {
        Ok(self.users.get_user(user_id).await?)
    }
}

/// 自分のプロフィールを編集するユースケース
pub struct EditProfileUseCase {
    users: Arc<dyn UserRepository>,
}

impl EditProfileUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: UserId, input: ProfileEditInput) -> Result<User, UserError> {
        let update = validate_profile_edit(input)?;
        let user = self.users.update_profile(user_id, update).await?;
        tracing::info!("User {} ({}) edited their profile", user.id, user.username);
        Ok(user)
    }
}
