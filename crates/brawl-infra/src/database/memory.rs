//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use brawl_core::domain::{Reminder, User};
use brawl_core::error::RepoError;
use brawl_core::ports::{BaseRepository, ReminderRepository, UserRepository};

/// Users keyed by id, with a secondary email index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<UserStore>,
}

#[derive(Default)]
struct UserStore {
    by_id: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.by_id.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // Email uniqueness is checked under the same write lock as the insert.
        let mut store = self.store.write().await;
        if store.by_email.contains_key(&user.email) {
            return Err(RepoError::Constraint("users.email".to_string()));
        }
        if store.by_id.contains_key(&user.id) {
            return Err(RepoError::Constraint("users.id".to_string()));
        }
        store.by_email.insert(user.email.clone(), user.id);
        store.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let user = store.by_id.remove(&id).ok_or(RepoError::NotFound)?;
        store.by_email.remove(&user.email);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .by_email
            .get(email)
            .and_then(|id| store.by_id.get(id))
            .cloned())
    }
}

/// Reminders keyed by id.
#[derive(Default)]
pub struct InMemoryReminderRepository {
    store: RwLock<HashMap<Uuid, Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Reminder, Uuid> for InMemoryReminderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, reminder: Reminder) -> Result<Reminder, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&reminder.id) {
            return Err(RepoError::Constraint("reminders.id".to_string()));
        }
        store.insert(reminder.id, reminder.clone());
        Ok(reminder)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError> {
        let mut owned: Vec<Reminder> = self
            .store
            .read()
            .await
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.event_time.cmp(&b.event_time).then(a.created_at.cmp(&b.created_at)));
        Ok(owned)
    }
}
