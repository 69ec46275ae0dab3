//! Query and mutation roots.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};

use common::AppError;
use domain::{CreateUser, LoginInput, RegisterInput, UpdateUser, User, UserResponse};

use crate::repository::UnitOfWork;
use crate::service::UserService;

/// Executable schema type
pub type UserSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the given service attached.
pub fn build_schema(service: Arc<dyn UserService>) -> UserSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// Fetch the service and the request's persistence context.
fn resolver_parts<'a>(
    ctx: &Context<'a>,
) -> Result<(&'a Arc<dyn UserService>, &'a Arc<dyn UnitOfWork>)> {
    Ok((
        ctx.data::<Arc<dyn UserService>>()?,
        ctx.data::<Arc<dyn UnitOfWork>>()?,
    ))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users
    async fn get_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .get_users(uow.as_ref())
            .await
            .map_err(AppError::into_graphql_error)
    }

    /// User by id, or null
    async fn get_user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .get_user(uow.as_ref(), id)
            .await
            .map_err(AppError::into_graphql_error)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(
        &self,
        ctx: &Context<'_>,
        register_input: RegisterInput,
    ) -> Result<UserResponse> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .register(uow.as_ref(), register_input)
            .await
            .map_err(AppError::into_graphql_error)
    }

    async fn login(&self, ctx: &Context<'_>, login_input: LoginInput) -> Result<UserResponse> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .login(uow.as_ref(), login_input)
            .await
            .map_err(AppError::into_graphql_error)
    }

    async fn create_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        name: String,
        password: String,
    ) -> Result<User> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .create_user(uow.as_ref(), CreateUser { email, name, password })
            .await
            .map_err(AppError::into_graphql_error)
    }

    /// Omitted or null arguments leave the stored value untouched
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: i32,
        email: Option<String>,
        name: Option<String>,
    ) -> Result<Option<User>> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .update_user(uow.as_ref(), id, UpdateUser { email, name })
            .await
            .map_err(AppError::into_graphql_error)
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let (service, uow) = resolver_parts(ctx)?;
        service
            .delete_user(uow.as_ref(), id)
            .await
            .map_err(AppError::into_graphql_error)
    }
}
