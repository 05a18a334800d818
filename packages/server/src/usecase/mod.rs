//! UseCase layer: application logic on top of the domain traits.

pub mod chat_connection;
pub mod connect_member;
pub mod create_group;
pub mod delete_group;
pub mod delete_user;
pub mod disconnect_member;
pub mod error;
pub mod get_chat_history;
pub mod get_groups;
pub mod join_group;
pub mod membership_oracle;
pub mod post_message;
pub mod register_user;
pub mod send_message;
pub mod user_profile;

pub use chat_connection::{ChatConnection, ChatServices, ConnectionState, InboundOutcome};
pub use connect_member::ConnectMemberUseCase;
pub use create_group::CreateGroupUseCase;
pub use delete_group::DeleteGroupUseCase;
pub use delete_user::DeleteUserUseCase;
pub use disconnect_member::DisconnectMemberUseCase;
pub use error::{ConnectError, GroupError, SendMessageError, UserError};
pub use get_chat_history::GetChatHistoryUseCase;
pub use get_groups::{GetGroupDetailUseCase, GetGroupsUseCase, GroupDetail};
pub use join_group::{JoinGroupUseCase, LeaveGroupUseCase};
pub use membership_oracle::MembershipOracle;
pub use post_message::PostMessageUseCase;
pub use register_user::RegisterUserUseCase;
pub use send_message::SendMessageUseCase;
pub use user_profile::{EditProfileUseCase, GetUserProfileUseCase};
