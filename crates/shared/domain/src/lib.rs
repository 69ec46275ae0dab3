//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The `graphql` feature derives the API schema types from these structs.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{CreateUser, FieldError, LoginInput, RegisterInput, UpdateUser, User, UserResponse};
