//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entity name reported when a write hits the unique email constraint.
const EMAIL_CONFLICT: &str = "Email";

/// User repository trait for dependency injection.
///
/// Writes that violate the unique email constraint fail with
/// `AppError::Conflict`; every other storage failure is `AppError::Database`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by primary key
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new user; `password_hash` must already be hashed
    async fn create(&self, email: String, name: String, password_hash: String) -> AppResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Delete user by ID. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

/// Map the outcome of an update write. A row deleted after the lookup
/// yields `RecordNotUpdated` and is reported as missing.
fn updated_user(result: Result<user::Model, DbErr>) -> AppResult<Option<User>> {
    match result {
        Ok(model) => Ok(Some(User::from(model))),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(AppError::from_write_err(e, EMAIL_CONFLICT)),
    }
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, email: String, name: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(email),
            name: Set(name),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write_err(e, EMAIL_CONFLICT))?;

        tracing::debug!(user_id = model.id, "User row inserted");
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<Option<User>> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut user = User::from(model.clone());
        changes.apply_to(&mut user);

        let mut active: ActiveModel = model.into();
        active.email = Set(user.email);
        active.name = Set(user.name);
        active.updated_at = Set(user.updated_at);

        updated_user(active.update(&self.db).await)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: i32) -> user::Model {
        let now = chrono::Utc::now();
        user::Model {
            id,
            email: "a@x.com".to_string(),
            name: "Ann".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_updated_row_is_returned() {
        let user = updated_user(Ok(model(3))).unwrap().unwrap();
        assert_eq!(user.id, 3);
    }

    #[test]
    fn test_row_deleted_before_update_is_missing() {
        let result = updated_user(Err(DbErr::RecordNotUpdated)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_other_update_failures_propagate() {
        let err = updated_user(Err(DbErr::Custom("disk full".into()))).unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
