//! Unit of Work - the request-scoped persistence context.
//!
//! The transport layer builds one `Persistence` per incoming request and
//! hands it to every service operation. Services never hold a connection
//! of their own.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{UserRepository, UserStore};

/// Persistence context trait for dependency injection.
///
/// Provides access to the repositories for the duration of one request.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;
}

/// Concrete implementation of UnitOfWork over the shared connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create a new persistence context
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }
}
