//! Identity of the caller behind a request or connection.

use async_trait::async_trait;

use super::value_object::{UserId, Username};

/// Authenticated principal
///
/// Resolved once per request/connection and passed explicitly to the use
/// cases that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub username: Username,
    pub full_name: String,
}

/// Identity provider trait
///
/// Resolves a credential presented by a client into a principal. Unknown or
/// malformed credentials yield `None`; implementations never fail loudly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, credential: &str) -> Option<Principal>;
}
