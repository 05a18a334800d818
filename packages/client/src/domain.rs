//! Domain logic for client-side operations.
//!
//! Pure functions and state without I/O, so they are easy to test.

use std::collections::HashMap;

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A refused connection will be refused again, so retrying is pointless.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Rejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    current_attempt < max_attempts
}

/// Messages sent from this client that the server has not answered yet,
/// keyed by their temp id.
#[derive(Debug, Default)]
pub struct PendingMessages {
    pending: HashMap<String, String>,
}

impl PendingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a temp id for `text` and remember it
    pub fn track(&mut self, text: &str) -> String {
        let temp_id = uuid::Uuid::new_v4().to_string();
        self.pending.insert(temp_id.clone(), text.to_string());
        temp_id
    }

    /// Resolve an answer from the server; returns the original text when the
    /// temp id was ours.
    pub fn resolve(&mut self, temp_id: Option<&str>) -> Option<String> {
        temp_id.and_then(|id| self.pending.remove(id))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_when_rejected() {
        // テスト項目: 接続が拒否された場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::Rejected(1);

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_when_rejected() {
        // テスト項目: 接続が拒否された場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::Rejected(1);

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_pending_messages_resolve_own_temp_id() {
        // テスト項目: 自分が送った temp_id の応答は元の本文に解決され、一度だけ取り出せる
        // given (前提条件):
        let mut pending = PendingMessages::new();
        let temp_id = pending.track("hello");

        // when (操作):
        let first = pending.resolve(Some(&temp_id));
        let second = pending.resolve(Some(&temp_id));

        // then (期待する結果):
        assert_eq!(first.as_deref(), Some("hello"));
        assert_eq!(second, None);
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn test_pending_messages_ignore_foreign_or_missing_temp_id() {
        // テスト項目: 他の接続の temp_id や temp_id 無しの応答は解決されない
        // given (前提条件):
        let mut pending = PendingMessages::new();
        pending.track("hello");

        // when (操作):
        let foreign = pending.resolve(Some("someone-else"));
        let missing = pending.resolve(None);

        // then (期待する結果):
        assert_eq!(foreign, None);
        assert_eq!(missing, None);
        assert_eq!(pending.len(), 1);
    }
}
