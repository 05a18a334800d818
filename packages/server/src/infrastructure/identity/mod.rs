//! IdentityProvider implementations.

pub mod token;

pub use token::TokenIdentityProvider;
