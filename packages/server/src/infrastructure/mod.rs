//! Infrastructure layer: implementations of the domain traits and the
//! wire DTOs.

pub mod dto;
pub mod identity;
pub mod repository;
pub mod room_registry;
