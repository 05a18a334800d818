//! Utilities shared by the Bookhaven chat server and client.

pub mod logger;
pub mod time;
