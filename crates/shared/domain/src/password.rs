//! Password value object - hashing and verification of user credentials.
//!
//! All hashing goes through Argon2 with a fresh random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::{MIN_PASSWORD_LENGTH, MSG_PASSWORD_TOO_SHORT};
use crate::error::{DomainError, DomainResult};

/// Hashed password. Never holds the plain text.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password after enforcing the length policy.
    ///
    /// Length is counted in Unicode scalar values, so `"😀😀😀"` is three
    /// characters and too short even though it spans six UTF-16 code units.
    ///
    /// # Errors
    /// Returns `DomainError::Password` if the password is shorter than
    /// `MIN_PASSWORD_LENGTH` characters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(MSG_PASSWORD_TOO_SHORT));
        }

        Self::hash_unchecked(plain_text)
    }

    /// Hash a plain text password without applying the length policy.
    pub fn hash_unchecked(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash (from the database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Self::argon2()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "secret1";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("secret2"));
    }

    #[test]
    fn test_hash_never_equals_plain_text() {
        let hash = Password::new("secret1").unwrap().into_string();
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1, pass2);
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_password_too_short() {
        let err = Password::new("12345").unwrap_err();
        assert_eq!(err, DomainError::Password(MSG_PASSWORD_TOO_SHORT.to_string()));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("123456").is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five two-byte characters are ten bytes but still too short
        assert!(Password::new("ééééé").is_err());
        assert!(Password::new("éééééé").is_ok());
    }

    #[test]
    fn test_length_counts_scalar_values_not_utf16_units() {
        // Each emoji is two UTF-16 code units but one character
        assert!(Password::new("😀😀😀").is_err());
        assert!(Password::new("😀😀😀😀😀😀").is_ok());
    }

    #[test]
    fn test_unchecked_hash_skips_policy() {
        let password = Password::hash_unchecked("abc").unwrap();
        assert!(password.verify("abc"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let password = Password::from_hash("not-a-hash".to_string());
        assert!(!password.verify("not-a-hash"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret1").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&password.into_string()));
    }
}
