//! Bookhaven group chat server.
//!
//! Layers, from the inside out:
//!
//! - `domain`: entities, value objects and the traits the use cases depend on
//! - `usecase`: membership checks, message sending and the connection state machine
//! - `infrastructure`: in-memory stores, the room registry, identity and wire DTOs
//! - `ui`: Axum HTTP / WebSocket surface

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
