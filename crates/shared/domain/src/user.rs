//! User domain entity and the shapes exchanged with API clients.
//!
//! With the `graphql` feature enabled these structs double as the GraphQL
//! schema types; field names are exposed in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{FIELD_EMAIL, FIELD_NAME};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    /// Argon2 hash, never serialized or exposed through the API
    #[serde(skip_serializing, default)]
    #[cfg_attr(feature = "graphql", graphql(skip))]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Update user's email
    pub fn update_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update user's name
    pub fn update_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Validation failure tied to a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of `register` and `login`: either field errors or the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl UserResponse {
    /// Successful response carrying the user
    pub fn with_user(user: User) -> Self {
        Self {
            errors: None,
            user: Some(user),
        }
    }

    /// Failed response with a single field error
    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: Some(vec![FieldError::new(field, message)]),
            user: None,
        }
    }
}

/// Registration input
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::InputObject),
    graphql(name = "UserRegisterInput")
)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "Email is required!"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required!"))]
    pub name: String,
    // Length policy lives in `Password::new`
    pub password: String,
}

impl RegisterInput {
    /// First missing required field, email before name.
    pub fn required_field_error(&self) -> Option<FieldError> {
        let errors = self.validate().err()?;
        let field_errors = errors.field_errors();

        [FIELD_EMAIL, FIELD_NAME].into_iter().find_map(|field| {
            let error = field_errors.get(field)?.first()?;
            let message = error.message.as_deref().unwrap_or(error.code.as_ref());
            Some(FieldError::new(field, message))
        })
    }
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(
    feature = "graphql",
    derive(async_graphql::InputObject),
    graphql(name = "UserLoginInput")
)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Unvalidated user creation data
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UpdateUser {
    /// Apply the provided fields to a user, refreshing `updated_at`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.update_email(email);
        }
        if let Some(name) = self.name {
            user.update_name(name);
        }
        user.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: "a@x.com".to_string(),
            name: "Ann".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_field_error_response() {
        let response = UserResponse::field_error("email", "Email already taken.");

        assert!(response.user.is_none());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"errors": [{"field": "email", "message": "Email already taken."}]})
        );
    }

    #[test]
    fn test_user_response_without_errors() {
        let response = UserResponse::with_user(sample_user());

        assert!(response.errors.is_none());
        assert_eq!(response.user.unwrap().name, "Ann");
    }

    fn register_input(email: &str, name: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            name: name.to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn test_required_fields_report_email_first() {
        let error = register_input("", "").required_field_error().unwrap();
        assert_eq!(error, FieldError::new("email", "Email is required!"));

        let error = register_input("a@x.com", "").required_field_error().unwrap();
        assert_eq!(error, FieldError::new("name", "Name is required!"));
    }

    #[test]
    fn test_required_fields_ignore_password() {
        assert!(register_input("a@x.com", "Ann").required_field_error().is_none());
    }

    #[test]
    fn test_partial_update_keeps_missing_fields() {
        let mut user = sample_user();
        let before = user.updated_at;

        UpdateUser {
            email: None,
            name: Some("X".to_string()),
        }
        .apply_to(&mut user);

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "X");
        assert!(user.updated_at >= before);
    }
}
