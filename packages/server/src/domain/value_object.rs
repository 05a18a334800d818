//! Value objects of the chat domain.
//!
//! 識別子は全て正の整数（サーバー採番）、文字列の値オブジェクトは
//! 生成時に検証され、不正な値を持つインスタンスは存在しない。

use std::fmt;

use uuid::Uuid;

use super::error::ValidationError;

/// Maximum length of a username
pub const USERNAME_MAX_CHARS: usize = 150;
/// Maximum length of a group name
pub const GROUP_NAME_MAX_CHARS: usize = 255;
/// Maximum length of first / middle / last names
pub const PERSON_NAME_MAX_CHARS: usize = 50;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// User identifier
    UserId
);
integer_id!(
    /// Discussion group identifier (also the chat room key)
    GroupId
);
integer_id!(
    /// Chat message identifier, assigned on append
    MessageId
);
integer_id!(
    /// Identifier of the content item a group focuses on
    ContentItemId
);

/// Identifier of one live socket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp (Unix milliseconds, UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Unique user handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username.
    ///
    /// Must be non-blank, at most 150 characters and contain no whitespace.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let value = required("username", value, USERNAME_MAX_CHARS)?;
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::Invalid {
                field: "username",
                reason: "must not contain whitespace".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group name (unique per creator)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        required("name", value, GROUP_NAME_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GroupName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-blank chat message text
///
/// Length limits are a deployment setting and are checked by
/// [`super::validation::validate_new_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Returns `EmptyMessage` for empty or whitespace-only text.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Client-generated correlation token (`temp_id` on the wire)
///
/// Opaque to the server; echoed back so a client can match an optimistic
/// render with the confirmed broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "temp_id" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Opaque bearer credential issued at sign-up
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: "token" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the secret.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Reference to a stored file attached to a message
///
/// Holds the storage path (e.g. `group_chat_files/2025/05/17/notes.pdf`);
/// the bytes live in external file storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment(String);

impl Attachment {
    /// Accepts relative storage paths with a non-empty file name and no
    /// `..` segments.
    pub fn new(path: String) -> Result<Self, ValidationError> {
        let path = path.trim().to_string();
        if path.is_empty() {
            return Err(ValidationError::Empty { field: "attachment" });
        }
        if path.starts_with('/') || path.ends_with('/') || path.split('/').any(|s| s == "..") {
            return Err(ValidationError::Invalid {
                field: "attachment",
                reason: "must be a relative file path".to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// The part after the last `/`
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub(crate) fn required(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}
