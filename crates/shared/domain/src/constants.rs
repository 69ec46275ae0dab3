//! Domain-level constants.
//!
//! These constants define business rules and the field errors reported
//! back to API clients.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Field names
// =============================================================================

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PASSWORD: &str = "password";

// =============================================================================
// Field error messages
// =============================================================================

// Required-field messages sit on the `RegisterInput` validators

pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least of 6 characters!";
pub const MSG_EMAIL_TAKEN: &str = "Email already taken.";
pub const MSG_EMAIL_UNKNOWN: &str = "User email doesn't exist";
pub const MSG_PASSWORD_INCORRECT: &str = "Incorrect password!";
