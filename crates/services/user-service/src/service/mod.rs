//! Application services layer.

mod user_service;

pub use user_service::{UserResolver, UserService};
