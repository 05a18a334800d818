//! UI layer: HTTP / WebSocket surface of the server.

pub mod auth;
pub mod error;
pub mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
