//! User service - registration, login and CRUD over the User entity.
//!
//! Every operation takes the request's persistence context explicitly.
//! Input problems a client can fix come back as field errors inside
//! `UserResponse`; only storage faults are returned as `Err`.

use async_trait::async_trait;

use common::AppResult;
use domain::{
    CreateUser, DomainError, LoginInput, Password, RegisterInput, UpdateUser, User, UserResponse,
    FIELD_EMAIL, FIELD_PASSWORD, MSG_EMAIL_TAKEN, MSG_EMAIL_UNKNOWN, MSG_PASSWORD_INCORRECT,
};

use crate::repository::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash the password and create a user
    async fn register(&self, uow: &dyn UnitOfWork, input: RegisterInput) -> AppResult<UserResponse>;

    /// Check credentials and return the matching user
    async fn login(&self, uow: &dyn UnitOfWork, input: LoginInput) -> AppResult<UserResponse>;

    /// List all users
    async fn get_users(&self, uow: &dyn UnitOfWork) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, uow: &dyn UnitOfWork, id: i32) -> AppResult<Option<User>>;

    /// Create a user without field validation
    async fn create_user(&self, uow: &dyn UnitOfWork, input: CreateUser) -> AppResult<User>;

    /// Overwrite only the provided fields
    async fn update_user(
        &self,
        uow: &dyn UnitOfWork,
        id: i32,
        changes: UpdateUser,
    ) -> AppResult<Option<User>>;

    /// Delete user, returning whether it existed
    async fn delete_user(&self, uow: &dyn UnitOfWork, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of UserService.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserResolver;

impl UserResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserService for UserResolver {
    async fn register(&self, uow: &dyn UnitOfWork, input: RegisterInput) -> AppResult<UserResponse> {
        // Email, then name, then password; first failure wins
        if let Some(error) = input.required_field_error() {
            return Ok(UserResponse::field_error(error.field, error.message));
        }

        let password = match Password::new(&input.password) {
            Ok(password) => password,
            Err(DomainError::Password(msg)) => {
                return Ok(UserResponse::field_error(FIELD_PASSWORD, msg));
            }
            Err(e) => return Err(e.into()),
        };

        match uow
            .users()
            .create(input.email, input.name, password.into_string())
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(UserResponse::with_user(user))
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!("Registration rejected, email already taken");
                Ok(UserResponse::field_error(FIELD_EMAIL, MSG_EMAIL_TAKEN))
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&self, uow: &dyn UnitOfWork, input: LoginInput) -> AppResult<UserResponse> {
        let Some(user) = uow.users().find_by_email(&input.email).await? else {
            return Ok(UserResponse::field_error(FIELD_EMAIL, MSG_EMAIL_UNKNOWN));
        };

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(&input.password) {
            tracing::debug!(user_id = user.id, "Login rejected, incorrect password");
            return Ok(UserResponse::field_error(FIELD_PASSWORD, MSG_PASSWORD_INCORRECT));
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(UserResponse::with_user(user))
    }

    async fn get_users(&self, uow: &dyn UnitOfWork) -> AppResult<Vec<User>> {
        uow.users().list().await
    }

    async fn get_user(&self, uow: &dyn UnitOfWork, id: i32) -> AppResult<Option<User>> {
        uow.users().find_by_id(id).await
    }

    async fn create_user(&self, uow: &dyn UnitOfWork, input: CreateUser) -> AppResult<User> {
        // Same hashing policy as register, minus the length check
        let password = Password::hash_unchecked(&input.password)?;
        let user = uow
            .users()
            .create(input.email, input.name, password.into_string())
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(
        &self,
        uow: &dyn UnitOfWork,
        id: i32,
        changes: UpdateUser,
    ) -> AppResult<Option<User>> {
        uow.users().update(id, changes).await
    }

    async fn delete_user(&self, uow: &dyn UnitOfWork, id: i32) -> AppResult<bool> {
        let deleted = uow.users().delete(id).await?;
        if deleted {
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(deleted)
    }
}
