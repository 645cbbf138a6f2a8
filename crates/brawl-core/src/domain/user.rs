use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::{AuthError, PasswordService};

/// User entity - an account that owns reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from plaintext credentials.
    ///
    /// The email is normalized and the password is hashed here, before the
    /// entity can reach a repository. The plaintext is not retained.
    pub fn register(
        email: &str,
        password: &str,
        passwords: &dyn PasswordService,
    ) -> Result<Self, AuthError> {
        let password_hash = passwords.hash(password)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a plaintext password against the stored hash.
    pub fn verify_password(
        &self,
        password: &str,
        passwords: &dyn PasswordService,
    ) -> Result<bool, AuthError> {
        passwords.verify(password, &self.password_hash)
    }
}

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
