//! User Service Library
//!
//! This crate provides user account management over a GraphQL API:
//! registration, login and basic CRUD on users.

pub mod config;
pub mod graphql;
pub mod infra;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::graphql::build_schema;
use crate::infra::Database;
use crate::routes::create_router;
use crate::service::{UserResolver, UserService};
use crate::state::AppState;

/// Build the HTTP application over an already connected database.
pub fn build_app(database: Arc<Database>, graphiql: bool) -> Router {
    let service: Arc<dyn UserService> = Arc::new(UserResolver::new());
    let schema = build_schema(service);

    create_router(AppState::new(schema, database, graphiql))
}

/// Run the HTTP server with the given configuration.
pub async fn run(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let database = Arc::new(Database::connect(&config.database).await?);

    let app = build_app(database, config.graphiql);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("User service listening on http://{}/graphql", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
