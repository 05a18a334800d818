//! Bearer-token identity provider backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AccessToken, IdentityProvider, Principal, UserRepository};

/// Resolves access tokens issued at sign-up.
pub struct TokenIdentityProvider {
    users: Arc<dyn UserRepository>,
}

impl TokenIdentityProvider {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn authenticate(&self, credential: &str) -> Option<Principal> {
        let token = AccessToken::new(credential.trim().to_string()).ok()?;
        match self.users.find_by_token(&token).await {
            Ok(user) => user.map(|u| u.principal()),
            Err(e) => {
                tracing::warn!("Token lookup failed: {}", e);
                None
            }
        }
    }
}
