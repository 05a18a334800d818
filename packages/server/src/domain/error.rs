//! Domain error types.

use thiserror::Error;

use super::value_object::{GroupId, UserId};

/// Input validation errors
///
/// Raised by value-object constructors and the functions in
/// [`super::validation`] before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Neither text nor attachment was supplied for a message
    #[error("a message needs text or a file attachment")]
    EmptyMessage,
}

/// Persistence errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("a group named '{0}' already exists for this creator")]
    DuplicateGroupName(String),

    #[error("user {user_id} is already a member of group {group_id}")]
    DuplicateMembership { user_id: UserId, group_id: GroupId },

    /// Removing the membership would leave the group without an admin
    #[error("user {user_id} is the last admin of group {group_id}")]
    LastAdmin { user_id: UserId, group_id: GroupId },

    /// Backend failure (connection loss, poisoned state, ...)
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors decoding a client event off the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatEventError {
    #[error("malformed chat event: {0}")]
    Malformed(String),

    #[error("unsupported frame: {0}")]
    UnsupportedFrame(&'static str),
}
