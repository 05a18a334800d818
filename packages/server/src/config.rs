//! Server configuration.

/// Default upper bound on message text, in characters
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longer texts are rejected before being stored
    pub max_message_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }
}
