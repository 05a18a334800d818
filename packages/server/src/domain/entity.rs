//! Domain entities.

use super::{
    error::ValidationError,
    identity::Principal,
    value_object::{
        AccessToken, Attachment, ContentItemId, GroupId, GroupName, MessageId, MessageText,
        Timestamp, UserId, Username,
    },
};

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
    pub token: AccessToken,
    pub date_joined: Timestamp,
}

impl User {
    /// "first last", or the username when both are blank
    pub fn full_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        if full_name.is_empty() {
            self.username.as_str().to_string()
        } else {
            full_name
        }
    }

    /// The identity carried by an authenticated connection
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            username: self.username.clone(),
            full_name: self.full_name(),
        }
    }
}

/// Validated sign-up data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
    pub token: AccessToken,
}

/// Validated profile edit; `None` leaves a field unchanged
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<Option<String>>,
    pub last_name: Option<String>,
    pub bio: Option<Option<String>>,
}

impl User {
    /// Apply a profile edit in place
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(middle_name) = update.middle_name {
            self.middle_name = middle_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
    }
}

/// Discussion group, the unit of chat rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub description: String,
    pub content_item_id: ContentItemId,
    pub is_private: bool,
    pub created_at: Timestamp,
    /// Cleared when the creator is deleted; the group survives.
    pub creator: Option<UserId>,
}

/// Validated group creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: GroupName,
    pub description: String,
    pub content_item_id: ContentItemId,
    pub is_private: bool,
}

/// Role of a user inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipRole {
    Admin,
    Member,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// Membership of a user in a group (at most one per pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub user_id: UserId,
    pub group_id: GroupId,
    pub role: MembershipRole,
    pub joined_at: Timestamp,
}

/// Message content before it is persisted
///
/// At least one of text and attachment is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    text: Option<MessageText>,
    attachment: Option<Attachment>,
}

impl NewChatMessage {
    pub fn new(
        text: Option<MessageText>,
        attachment: Option<Attachment>,
    ) -> Result<Self, ValidationError> {
        if text.is_none() && attachment.is_none() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self { text, attachment })
    }

    pub fn text(text: MessageText) -> Self {
        Self {
            text: Some(text),
            attachment: None,
        }
    }

    pub fn text_content(&self) -> Option<&MessageText> {
        self.text.as_ref()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn into_parts(self) -> (Option<MessageText>, Option<Attachment>) {
        (self.text, self.attachment)
    }
}

/// Persisted chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub group_id: GroupId,
    pub sender: UserId,
    pub text: Option<MessageText>,
    pub attachment: Option<Attachment>,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Text body, empty for file-only messages
    pub fn text_or_empty(&self) -> &str {
        self.text.as_ref().map(MessageText::as_str).unwrap_or("")
    }
}
