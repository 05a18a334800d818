//! HTTP endpoints for chat history and non-socket posting.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{CorrelationId, GroupId, validation::MessageInput},
    infrastructure::dto::http::{ChatMessageDto, PostMessageRequest},
    ui::{auth::RequireUser, error::ApiError, state::AppState},
};

/// Chat history of a group, oldest first (members only)
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Path(group_id): Path<i64>,
) -> Result<Json<Vec<ChatMessageDto>>, ApiError> {
    let history = state
        .get_chat_history_usecase
        .execute(&principal, GroupId::new(group_id))
        .await?;
    Ok(Json(history.iter().map(ChatMessageDto::from).collect()))
}

/// Post a message without a socket; it is broadcast to the live room too
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Path(group_id): Path<i64>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessageDto>), ApiError> {
    let input = MessageInput {
        text: request.message,
        attachment: request.attachment,
    };
    let temp_id = request.temp_id.and_then(|id| CorrelationId::new(id).ok());
    let received = state
        .post_message_usecase
        .execute(&principal, GroupId::new(group_id), input, temp_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ChatMessageDto::from(&received))))
}
