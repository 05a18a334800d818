//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ChatServices, CreateGroupUseCase, DeleteGroupUseCase, DeleteUserUseCase, EditProfileUseCase,
    GetChatHistoryUseCase, GetGroupDetailUseCase, GetGroupsUseCase, GetUserProfileUseCase,
    JoinGroupUseCase, LeaveGroupUseCase, PostMessageUseCase, RegisterUserUseCase,
};

/// State shared by every handler
pub struct AppState {
    /// Services used by each WebSocket connection (identity included)
    pub chat: ChatServices,
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub delete_user_usecase: Arc<DeleteUserUseCase>,
    pub get_user_profile_usecase: Arc<GetUserProfileUseCase>,
    pub edit_profile_usecase: Arc<EditProfileUseCase>,
    pub create_group_usecase: Arc<CreateGroupUseCase>,
    pub get_groups_usecase: Arc<GetGroupsUseCase>,
    pub get_group_detail_usecase: Arc<GetGroupDetailUseCase>,
    pub delete_group_usecase: Arc<DeleteGroupUseCase>,
    pub join_group_usecase: Arc<JoinGroupUseCase>,
    pub leave_group_usecase: Arc<LeaveGroupUseCase>,
    pub get_chat_history_usecase: Arc<GetChatHistoryUseCase>,
    pub post_message_usecase: Arc<PostMessageUseCase>,
}
