//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server closed the socket on connect (bad token or not a member)
    #[error("Connection to group {0} was refused by the server")]
    Rejected(i64),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
