//! Application state for dependency injection.

use std::sync::Arc;

use crate::graphql::UserSchema;
use crate::infra::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub schema: UserSchema,
    pub database: Arc<Database>,
    pub graphiql: bool,
}

impl AppState {
    /// Create new app state.
    pub fn new(schema: UserSchema, database: Arc<Database>, graphiql: bool) -> Self {
        Self {
            schema,
            database,
            graphiql,
        }
    }
}
