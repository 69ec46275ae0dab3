//! HTTP routes: GraphQL endpoint, GraphiQL and health check.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use common::{AppError, AppResult};

use crate::repository::{Persistence, UnitOfWork};
use crate::state::AppState;

/// GraphQL endpoint path
pub const GRAPHQL_PATH: &str = "/graphql";

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "User service GraphQL API"
}

/// Execute a GraphQL request with a fresh persistence context.
async fn graphql_handler(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let uow: Arc<dyn UnitOfWork> = Arc::new(Persistence::new(state.database.get_connection()));
    Json(state.schema.execute(request.data(uow)).await)
}

/// GraphiQL IDE, when enabled
async fn graphiql(State(state): State<AppState>) -> Response {
    if !state.graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response()
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.database.ping().await.map_err(|e| {
        tracing::error!("Database ping failed: {}", e);
        AppError::service_unavailable("database")
    })?;

    Ok(Json(HealthResponse { status: "healthy" }))
}
