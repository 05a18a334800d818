//! UseCase layer error types.

use thiserror::Error;

use crate::domain::{GroupId, RepositoryError, UserId, ValidationError};

/// Failure to bring a connection into its room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("no authenticated identity on the connection")]
    AuthenticationMissing,

    #[error("user {user_id} is not a member of group {group_id}")]
    NotAMember { user_id: UserId, group_id: GroupId },

    #[error("connection is already closed")]
    Closed,
}

/// Failure to send one chat message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("message has no text and no attachment")]
    EmptyMessage,

    #[error("invalid message: {0}")]
    Validation(ValidationError),

    #[error("failed to persist message: {0}")]
    Persistence(RepositoryError),
}

impl From<ValidationError> for SendMessageError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::EmptyMessage => Self::EmptyMessage,
            other => Self::Validation(other),
        }
    }
}

/// Errors of the group / membership / history use cases
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("group {0} not found")]
    NotFound(GroupId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("user {user_id} is not a member of group {group_id}")]
    NotAMember { user_id: UserId, group_id: GroupId },

    #[error("user {user_id} is not an admin of group {group_id}")]
    NotAdmin { user_id: UserId, group_id: GroupId },

    #[error("group {0} is private")]
    PrivateGroup(GroupId),

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for GroupError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::GroupNotFound(group_id) => Self::NotFound(group_id),
            RepositoryError::UserNotFound(user_id) => Self::UserNotFound(user_id),
            RepositoryError::DuplicateGroupName(_)
            | RepositoryError::DuplicateMembership { .. }
            | RepositoryError::LastAdmin { .. } => Self::Conflict(e.to_string()),
            other => Self::Repository(other),
        }
    }
}

impl From<SendMessageError> for GroupError {
    fn from(e: SendMessageError) -> Self {
        match e {
            SendMessageError::EmptyMessage => Self::Validation(ValidationError::EmptyMessage),
            SendMessageError::Validation(v) => Self::Validation(v),
            SendMessageError::Persistence(r) => r.into(),
        }
    }
}

/// Errors of the user account use cases
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("user '{0}' not found")]
    UsernameNotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UserError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::UserNotFound(user_id) => Self::NotFound(user_id),
            RepositoryError::DuplicateUsername(_) => Self::Conflict(e.to_string()),
            other => Self::Repository(other),
        }
    }
}
