//! Mapping of use case errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::ErrorResponse,
    usecase::{GroupError, UserError},
};

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// No valid bearer token
    Unauthorized,
    Group(GroupError),
    User(UserError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Group(e) => match e {
                GroupError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                GroupError::NotFound(_) | GroupError::UserNotFound(_) => StatusCode::NOT_FOUND,
                GroupError::NotAMember { .. }
                | GroupError::NotAdmin { .. }
                | GroupError::PrivateGroup(_) => StatusCode::FORBIDDEN,
                GroupError::Conflict(_) => StatusCode::CONFLICT,
                GroupError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::User(e) => match e {
                UserError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                UserError::NotFound(_) | UserError::UsernameNotFound(_) => StatusCode::NOT_FOUND,
                UserError::Conflict(_) => StatusCode::CONFLICT,
                UserError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unauthorized => "authentication required".to_string(),
            Self::Group(e) => e.to_string(),
            Self::User(e) => e.to_string(),
        }
    }
}

impl From<GroupError> for ApiError {
    fn from(e: GroupError) -> Self {
        Self::Group(e)
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        Self::User(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
            "internal server error".to_string()
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.message());
            self.message()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupId, RepositoryError, UserId, ValidationError};

    #[test]
    fn test_status_mapping() {
        // テスト項目: ユースケースのエラーが対応する HTTP ステータスに変換される
        // given (前提条件):
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ApiError::Group(GroupError::NotAMember {
                    user_id: UserId::new(1),
                    group_id: GroupId::new(1),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::Group(GroupError::NotFound(GroupId::new(1))),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Group(GroupError::Conflict("dup".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::User(UserError::Validation(ValidationError::EmptyMessage)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::User(UserError::UsernameNotFound("nobody".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::User(UserError::Repository(RepositoryError::Storage(
                    "down".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        // when (操作) / then (期待する結果):
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
