//! Dependency wiring.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{GroupRepository, MembershipRepository, MessageStore, RoomRegistry, UserRepository},
    infrastructure::{
        identity::TokenIdentityProvider, repository::InMemoryStore,
        room_registry::InMemoryRoomRegistry,
    },
    ui::AppState,
    usecase::{
        ChatServices, ConnectMemberUseCase, CreateGroupUseCase, DeleteGroupUseCase,
        DeleteUserUseCase, DisconnectMemberUseCase, EditProfileUseCase, GetChatHistoryUseCase,
        GetGroupDetailUseCase, GetGroupsUseCase, GetUserProfileUseCase, JoinGroupUseCase,
        LeaveGroupUseCase, MembershipOracle, PostMessageUseCase, RegisterUserUseCase,
        SendMessageUseCase,
    },
};

/// Build the application state on the in-memory backends.
///
/// Dependencies are created in order: store, registry, oracle, use cases.
pub fn build_state(config: &ServerConfig) -> AppState {
    // 1. Repository（インメモリ DB）
    let store = Arc::new(InMemoryStore::new());
    let users: Arc<dyn UserRepository> = store.clone();
    let groups: Arc<dyn GroupRepository> = store.clone();
    let memberships: Arc<dyn MembershipRepository> = store.clone();
    let messages: Arc<dyn MessageStore> = store;

    // 2. Room Registry
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());

    // 3. Membership Oracle
    let oracle = Arc::new(MembershipOracle::new(memberships.clone()));

    // 4. UseCases
    let send_message = Arc::new(SendMessageUseCase::new(
        messages.clone(),
        registry.clone(),
        config.max_message_chars,
    ));
    let chat = ChatServices {
        identity: Arc::new(TokenIdentityProvider::new(users.clone())),
        connect_member: Arc::new(ConnectMemberUseCase::new(oracle.clone(), registry.clone())),
        disconnect_member: Arc::new(DisconnectMemberUseCase::new(registry.clone())),
        send_message: send_message.clone(),
    };

    AppState {
        chat,
        register_user_usecase: Arc::new(RegisterUserUseCase::new(users.clone())),
        delete_user_usecase: Arc::new(DeleteUserUseCase::new(users.clone(), registry.clone())),
        get_user_profile_usecase: Arc::new(GetUserProfileUseCase::new(users.clone())),
        edit_profile_usecase: Arc::new(EditProfileUseCase::new(users.clone())),
        create_group_usecase: Arc::new(CreateGroupUseCase::new(groups.clone())),
        get_groups_usecase: Arc::new(GetGroupsUseCase::new(groups.clone(), oracle.clone())),
        get_group_detail_usecase: Arc::new(GetGroupDetailUseCase::new(
            groups.clone(),
            memberships.clone(),
            oracle.clone(),
            registry.clone(),
        )),
        delete_group_usecase: Arc::new(DeleteGroupUseCase::new(groups.clone(), oracle.clone())),
        join_group_usecase: Arc::new(JoinGroupUseCase::new(
            groups.clone(),
            memberships.clone(),
            oracle.clone(),
        )),
        leave_group_usecase: Arc::new(LeaveGroupUseCase::new(memberships, registry.clone())),
        get_chat_history_usecase: Arc::new(GetChatHistoryUseCase::new(
            groups.clone(),
            users,
            messages,
            oracle.clone(),
        )),
        post_message_usecase: Arc::new(PostMessageUseCase::new(groups, oracle, send_message)),
    }
}
