//! Input validation run before any persistence call.
//!
//! Each function takes raw client input and returns the validated domain
//! value, mirroring the constraints of the stored records.

use super::{
    entity::{NewChatMessage, NewGroup, NewUser, ProfileUpdate},
    error::ValidationError,
    value_object::{
        AccessToken, Attachment, ContentItemId, GroupName, MessageText, PERSON_NAME_MAX_CHARS,
        Username, required,
    },
};

/// Raw sign-up input
#[derive(Debug, Clone, Default)]
pub struct SignUpInput {
    pub username: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
}

/// Raw profile edit input; absent fields stay unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileEditInput {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Raw group creation input
#[derive(Debug, Clone, Default)]
pub struct CreateGroupInput {
    pub name: String,
    pub description: Option<String>,
    pub content_item_id: i64,
    pub is_private: bool,
}

/// Raw message input (socket or HTTP)
#[derive(Debug, Clone, Default)]
pub struct MessageInput {
    pub text: Option<String>,
    pub attachment: Option<String>,
}

pub fn validate_new_user(input: SignUpInput, token: AccessToken) -> Result<NewUser, ValidationError> {
    let username = Username::new(input.username)?;
    let first_name = required("first_name", input.first_name, PERSON_NAME_MAX_CHARS)?;
    let last_name = required("last_name", input.last_name, PERSON_NAME_MAX_CHARS)?;
    let middle_name = optional("middle_name", input.middle_name, Some(PERSON_NAME_MAX_CHARS))?;
    let bio = optional("bio", input.bio, None)?;

    Ok(NewUser {
        username,
        first_name,
        middle_name,
        last_name,
        bio,
        token,
    })
}

/// Validate a profile edit.
///
/// Unlike sign-up, first and last name may be blanked; a user with both
/// blank is displayed by username.
pub fn validate_profile_edit(input: ProfileEditInput) -> Result<ProfileUpdate, ValidationError> {
    Ok(ProfileUpdate {
        first_name: input
            .first_name
            .map(|v| blankable("first_name", v, PERSON_NAME_MAX_CHARS))
            .transpose()?,
        middle_name: input
            .middle_name
            .map(|v| optional("middle_name", Some(v), Some(PERSON_NAME_MAX_CHARS)))
            .transpose()?,
        last_name: input
            .last_name
            .map(|v| blankable("last_name", v, PERSON_NAME_MAX_CHARS))
            .transpose()?,
        bio: input
            .bio
            .map(|v| optional("bio", Some(v), None))
            .transpose()?,
    })
}

pub fn validate_new_group(input: CreateGroupInput) -> Result<NewGroup, ValidationError> {
    let name = GroupName::new(input.name)?;
    if input.content_item_id <= 0 {
        return Err(ValidationError::Invalid {
            field: "content_item_id",
            reason: "must be a positive id".to_string(),
        });
    }

    Ok(NewGroup {
        name,
        description: input.description.unwrap_or_default().trim().to_string(),
        content_item_id: ContentItemId::new(input.content_item_id),
        is_private: input.is_private,
    })
}

/// Validate a message body.
///
/// Blank text counts as absent. Returns `EmptyMessage` when nothing usable
/// remains and `TooLong` when the text exceeds `max_text_chars`.
pub fn validate_new_message(
    input: MessageInput,
    max_text_chars: usize,
) -> Result<NewChatMessage, ValidationError> {
    let text = input.text.and_then(|text| MessageText::new(text).ok());
    if let Some(text) = &text
        && text.char_count() > max_text_chars
    {
        return Err(ValidationError::TooLong {
            field: "message",
            max: max_text_chars,
        });
    }

    let attachment = match input.attachment {
        Some(path) if !path.trim().is_empty() => Some(Attachment::new(path)?),
        _ => None,
    };

    NewChatMessage::new(text, attachment)
}

/// Trimmed text that may be empty.
fn blankable(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

/// Blank optional text becomes `None`.
fn optional(
    field: &'static str,
    value: Option<String>,
    max: Option<usize>,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Some(max) = max
        && value.chars().count() > max
    {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up_input() -> SignUpInput {
        SignUpInput {
            username: "ada".to_string(),
            first_name: "Ada".to_string(),
            middle_name: Some("  ".to_string()),
            last_name: "Lovelace".to_string(),
            bio: Some(" Likes engines ".to_string()),
        }
    }

    #[test]
    fn test_validate_new_user_success() {
        // テスト項目: 正しい入力からユーザー作成データが生成され、空の任意項目は None になる
        // given (前提条件):
        let input = sign_up_input();

        // when (操作):
        let new_user = validate_new_user(input, AccessToken::generate()).unwrap();

        // then (期待する結果):
        assert_eq!(new_user.username.as_str(), "ada");
        assert_eq!(new_user.middle_name, None);
        assert_eq!(new_user.bio.as_deref(), Some("Likes engines"));
    }

    #[test]
    fn test_validate_new_user_requires_last_name() {
        // テスト項目: 姓が空の場合は検証エラーになる
        // given (前提条件):
        let input = SignUpInput {
            last_name: String::new(),
            ..sign_up_input()
        };

        // when (操作):
        let result = validate_new_user(input, AccessToken::generate());

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty { field: "last_name" }));
    }

    #[test]
    fn test_validate_new_user_first_name_too_long() {
        // テスト項目: 名が 50 文字を超える場合は検証エラーになる
        // given (前提条件):
        let input = SignUpInput {
            first_name: "x".repeat(PERSON_NAME_MAX_CHARS + 1),
            ..sign_up_input()
        };

        // when (操作):
        let result = validate_new_user(input, AccessToken::generate());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::TooLong {
                field: "first_name",
                max: PERSON_NAME_MAX_CHARS
            })
        );
    }

    #[test]
    fn test_validate_profile_edit_allows_blank_names() {
        // テスト項目: プロフィール編集では姓名を空にでき、空の任意項目は None になり、未指定の項目は変更されない
        // given (前提条件):
        let input = ProfileEditInput {
            first_name: Some("  ".to_string()),
            middle_name: Some(String::new()),
            last_name: Some(String::new()),
            bio: None,
        };

        // when (操作):
        let update = validate_profile_edit(input).unwrap();

        // then (期待する結果):
        assert_eq!(update.first_name.as_deref(), Some(""));
        assert_eq!(update.middle_name, Some(None));
        assert_eq!(update.last_name.as_deref(), Some(""));
        assert_eq!(update.bio, None);
    }

    #[test]
    fn test_validate_profile_edit_name_too_long() {
        // テスト項目: プロフィール編集でも姓名は 50 文字以内
        // given (前提条件):
        let input = ProfileEditInput {
            last_name: Some("x".repeat(PERSON_NAME_MAX_CHARS + 1)),
            ..Default::default()
        };

        // when (操作):
        let result = validate_profile_edit(input);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::TooLong {
                field: "last_name",
                max: PERSON_NAME_MAX_CHARS
            })
        );
    }

    #[test]
    fn test_validate_new_group_rejects_blank_name_and_bad_content_item() {
        // テスト項目: グループ名が空、または対象コンテンツ ID が不正な場合は拒否される
        // given (前提条件):
        let blank_name = CreateGroupInput {
            name: "  ".to_string(),
            content_item_id: 1,
            ..Default::default()
        };
        let bad_item = CreateGroupInput {
            name: "BookClub".to_string(),
            content_item_id: 0,
            ..Default::default()
        };

        // when (操作):
        let blank_result = validate_new_group(blank_name);
        let item_result = validate_new_group(bad_item);

        // then (期待する結果):
        assert_eq!(blank_result, Err(ValidationError::Empty { field: "name" }));
        assert!(matches!(
            item_result,
            Err(ValidationError::Invalid { field: "content_item_id", .. })
        ));
    }

    #[test]
    fn test_validate_new_message_blank_text_is_empty_message() {
        // テスト項目: 空白のみの本文で添付ファイルもない場合は EmptyMessage になる
        // given (前提条件):
        let input = MessageInput {
            text: Some("   ".to_string()),
            attachment: None,
        };

        // when (操作):
        let result = validate_new_message(input, 100);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_validate_new_message_file_only() {
        // テスト項目: 添付ファイルのみのメッセージは有効
        // given (前提条件):
        let input = MessageInput {
            text: None,
            attachment: Some("group_chat_files/2025/01/02/map.png".to_string()),
        };

        // when (操作):
        let message = validate_new_message(input, 100).unwrap();

        // then (期待する結果):
        assert!(message.text_content().is_none());
        assert_eq!(message.attachment().unwrap().file_name(), "map.png");
    }

    #[test]
    fn test_validate_new_message_too_long() {
        // テスト項目: 上限文字数を超える本文は TooLong になる
        // given (前提条件):
        let input = MessageInput {
            text: Some("é".repeat(11)),
            attachment: None,
        };

        // when (操作):
        let result = validate_new_message(input, 10);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::TooLong {
                field: "message",
                max: 10
            })
        );
    }
}
