//! Token value objects returned by the token endpoint.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
