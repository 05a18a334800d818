//! HTTP API endpoint handlers for accounts and groups.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{
        GroupId, UserId,
        validation::{CreateGroupInput, ProfileEditInput, SignUpInput},
    },
    infrastructure::dto::http::{
        CreateGroupRequest, EditProfileRequest, GroupDetailDto, GroupSummaryDto,
        JoinGroupRequest, MemberDto, SignUpRequest, SignUpResponse, UserDto, UserProfileDto,
    },
    ui::{
        auth::{CurrentUser, RequireUser},
        error::ApiError,
        state::AppState,
    },
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Register a user; the response carries the access token
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    let input = SignUpInput {
        username: request.username,
        first_name: request.first_name,
        middle_name: request.middle_name,
        last_name: request.last_name,
        bio: request.bio,
    };
    let user = state.register_user_usecase.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user: UserDto::from(&user),
            token: user.token.as_str().to_string(),
        }),
    ))
}

/// Delete the caller's account
pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
) -> Result<StatusCode, ApiError> {
    state.delete_user_usecase.execute(principal.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's own profile
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
) -> Result<Json<UserProfileDto>, ApiError> {
    let user = state.get_user_profile_usecase.by_id(principal.user_id).await?;
    Ok(Json(UserProfileDto {
        user: UserDto::from(&user),
        is_own_profile: true,
    }))
}

/// Edit the caller's names and bio
pub async fn edit_me(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Json(request): Json<EditProfileRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let input = ProfileEditInput {
        first_name: request.first_name,
        middle_name: request.middle_name,
        last_name: request.last_name,
        bio: request.bio,
    };
    let user = state
        .edit_profile_usecase
        .execute(principal.user_id, input)
        .await?;
    Ok(Json(UserDto::from(&user)))
}

/// Public profile lookup by username
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfileDto>, ApiError> {
    let user = state.get_user_profile_usecase.execute(&username).await?;
    let is_own_profile = viewer.is_some_and(|v| v.user_id == user.id);
    Ok(Json(UserProfileDto {
        user: UserDto::from(&user),
        is_own_profile,
    }))
}

/// List groups visible to the caller
pub async fn get_groups(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
) -> Result<Json<Vec<GroupSummaryDto>>, ApiError> {
    let groups = state.get_groups_usecase.execute(viewer.as_ref()).await?;
    Ok(Json(groups.iter().map(GroupSummaryDto::from).collect()))
}

/// Create a group; the caller becomes its admin
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupSummaryDto>), ApiError> {
    let input = CreateGroupInput {
        name: request.name,
        description: request.description,
        content_item_id: request.content_item_id,
        is_private: request.is_private,
    };
    let (group, _) = state
        .create_group_usecase
        .execute(&principal, input)
        .await?;
    Ok((StatusCode::CREATED, Json(GroupSummaryDto::from(&group))))
}

pub async fn get_group_detail(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Path(group_id): Path<i64>,
) -> Result<Json<GroupDetailDto>, ApiError> {
    let detail = state
        .get_group_detail_usecase
        .execute(viewer.as_ref(), GroupId::new(group_id))
        .await?;

    // Domain Model から DTO への変換
    Ok(Json(GroupDetailDto {
        group: GroupSummaryDto::from(&detail.group),
        members: detail.members.iter().map(MemberDto::from).collect(),
        online: detail.online,
    }))
}

/// Delete a group (admins only)
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Path(group_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_group_usecase
        .execute(&principal, GroupId::new(group_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a group, or add another user when the caller is an admin
pub async fn join_group(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Path(group_id): Path<i64>,
    request: Option<Json<JoinGroupRequest>>,
) -> Result<(StatusCode, Json<MemberDto>), ApiError> {
    let target = request.and_then(|Json(r)| r.user_id).map(UserId::new);
    let membership = state
        .join_group_usecase
        .execute(&principal, GroupId::new(group_id), target)
        .await?;
    Ok((StatusCode::CREATED, Json(MemberDto::from(&membership))))
}

/// Leave a group
pub async fn leave_group(
    State(state): State<Arc<AppState>>,
    RequireUser(principal): RequireUser,
    Path(group_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .leave_group_usecase
        .execute(&principal, GroupId::new(group_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
