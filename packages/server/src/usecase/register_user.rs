//! UseCase: ユーザー登録処理

use std::sync::Arc;

use crate::domain::{
    AccessToken, User, UserRepository,
    validation::{SignUpInput, validate_new_user},
};

use super::error::UserError;

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// 入力を検証してユーザーを作成し、アクセストークンを発行する
    pub async fn execute(&self, input: SignUpInput) -> Result<User, UserError> {
        let new_user = validate_new_user(input, AccessToken::generate())?;
        let user = self.users.create_user(new_user).await?;
        tracing::info!("User '{}' registered with id {}", user.username, user.id);
        Ok(user)
    }
}
