use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Reminder, User};
use crate::error::RepoError;

/// Generic repository trait for the create/read/delete lifecycle.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique key collisions surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
///
/// Implementations must reject a second user with the same email atomically.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Reminder repository.
#[async_trait]
pub trait ReminderRepository: BaseRepository<Reminder, Uuid> {
    /// All reminders of one owner, ascending by event time.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError>;
}
