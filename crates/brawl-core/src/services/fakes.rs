//! Port fakes for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::{Reminder, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, PasswordService, ReminderRepository, TokenClaims, TokenService,
    UserRepository,
};

pub struct ReversingHasher;

impl PasswordService for ReversingHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.chars().rev().collect())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(password)? == hash)
    }
}

pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        Ok(format!("token:{}", user_id))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let raw = token
            .strip_prefix("token:")
            .ok_or_else(|| AuthError::InvalidToken("bad prefix".to_string()))?;
        let user_id = Uuid::parse_str(raw).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(TokenClaims {
            user_id,
            expires_at: Utc::now() + TimeDelta::hours(24),
        })
    }

    fn expiration_seconds(&self) -> i64 {
        86400
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryReminders {
    reminders: Mutex<Vec<Reminder>>,
}

#[async_trait]
impl BaseRepository<Reminder, Uuid> for MemoryReminders {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, RepoError> {
        Ok(self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert(&self, reminder: Reminder) -> Result<Reminder, RepoError> {
        self.reminders.lock().unwrap().push(reminder.clone());
        Ok(reminder)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut reminders = self.reminders.lock().unwrap();
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        if reminders.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ReminderRepository for MemoryReminders {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError> {
        let mut owned: Vec<Reminder> = self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.event_time);
        Ok(owned)
    }
}
