//! Domain layer: entities, value objects and the ports the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod identity;
pub mod repository;
pub mod room_registry;
pub mod validation;
pub mod value_object;

pub use entity::{
    ChatMessage, Group, Membership, MembershipRole, NewChatMessage, NewGroup, NewUser,
    ProfileUpdate, User,
};
pub use error::{ChatEventError, RepositoryError, ValidationError};
pub use event::{ChatEvent, InboundChatEvent, MessageError, MessageReceived};
pub use identity::{IdentityProvider, Principal};
pub use repository::{GroupRepository, MembershipRepository, MessageStore, UserRepository};
pub use room_registry::{PusherChannel, RoomConnection, RoomRegistry};
pub use value_object::{
    AccessToken, Attachment, ConnectionId, ContentItemId, CorrelationId, GroupId, GroupName,
    MessageId, MessageText, Timestamp, UserId, Username,
};
