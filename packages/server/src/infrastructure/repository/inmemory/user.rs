use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::{
    AccessToken, NewUser, ProfileUpdate, RepositoryError, User, UserId, UserRepository,
};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;

        if state
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(RepositoryError::DuplicateUsername(
                new_user.username.into_string(),
            ));
        }

        let id = UserId::new(state.next_user_id);
        state.next_user_id += 1;

        let user = User {
            id,
            username: new_user.username,
            first_name: new_user.first_name,
            middle_name: new_user.middle_name,
            last_name: new_user.last_name,
            bio: new_user.bio,
            token: new_user.token,
            date_joined: self.now(),
        };
        state.users.insert(id, user.clone());
        tracing::debug!("User '{}' created with id {}", user.username, id);

        Ok(user)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, RepositoryError> {
        let state = self.state.lock().await;
        state.user(user_id).cloned()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(RepositoryError::UserNotFound(user_id))?;
        user.apply_profile(update);
        tracing::debug!("Profile of user {} updated", user_id);
        Ok(user.clone())
    }

    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| &u.token == token).cloned())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        state.user(user_id)?;
        state.remove_user_cascade(user_id);
        tracing::debug!("User {} deleted", user_id);
        Ok(())
    }
}
