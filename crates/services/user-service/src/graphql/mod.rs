//! GraphQL schema over the user service.
//!
//! The schema is built once at startup with the service attached as data.
//! Each request must carry its own `Arc<dyn UnitOfWork>` as request data.

mod schema;

pub use schema::{build_schema, MutationRoot, QueryRoot, UserSchema};
