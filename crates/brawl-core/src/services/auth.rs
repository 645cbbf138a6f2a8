use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::mask_email;
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

const MISSING_CREDENTIALS: &str = "Please enter email and password";
const INVALID_EMAIL: &str = "Invalid email address";
const USER_EXISTS: &str = "User already exists with this email";

/// Registration, login and token verification.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create an account and return a session token for it.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(MISSING_CREDENTIALS.to_string()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation(INVALID_EMAIL.to_string()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::warn!(user_email = %mask_email(&email), "Registration for existing email");
            return Err(DomainError::Conflict(USER_EXISTS.to_string()));
        }

        let passwords = Arc::clone(&self.passwords);
        let (new_email, password) = (email.clone(), password.to_string());
        let user = off_executor(move || User::register(&new_email, &password, passwords.as_ref()))
            .await?;

        // The pre-check above can race with a concurrent registration; the store decides.
        let user = match self.users.insert(user).await {
            Ok(user) => user,
            Err(RepoError::Constraint(_)) => {
                tracing::warn!(user_email = %mask_email(&email), "Lost registration race");
                return Err(DomainError::Conflict(USER_EXISTS.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.tokens.generate_token(user.id)?;
        tracing::info!(user_id = %user.id, user_email = %mask_email(&user.email), "User registered");
        Ok(token)
    }

    /// Check credentials and return a fresh session token.
    ///
    /// Unknown email and wrong password fail with the same `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(MISSING_CREDENTIALS.to_string()));
        }

        let passwords = Arc::clone(&self.passwords);
        let password = password.to_string();
        let Some(user) = self.users.find_by_email(&email).await? else {
            // Spend the hashing cost anyway so both failure paths take similar time.
            let _ = off_executor(move || passwords.hash(&password)).await;
            tracing::debug!(user_email = %mask_email(&email), "Login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let candidate = user.clone();
        let matches =
            off_executor(move || candidate.verify_password(&password, passwords.as_ref())).await?;
        if !matches {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.generate_token(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Resolve a session token to the user it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        let claims = self.tokens.validate_token(token)?;
        Ok(claims.user_id)
    }
}

/// Run password hashing on the blocking pool so it never stalls the async workers.
async fn off_executor<T, F>(work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::HashingError(e.to_string()))?
}
