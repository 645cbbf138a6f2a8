//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use brawl_core::domain::{Reminder, User};
use brawl_core::error::RepoError;
use brawl_core::mask_email;
use brawl_core::ports::{ReminderRepository, UserRepository};

use super::entity::reminder::{self, Entity as ReminderEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository. Email uniqueness is enforced by the `users.email` index.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL reminder repository.
pub type PostgresReminderRepository = PostgresBaseRepository<ReminderEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ReminderRepository for PostgresReminderRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, RepoError> {
        let result = ReminderEntity::find()
            .filter(reminder::Column::OwnerId.eq(owner_id))
            .order_by_asc(reminder::Column::EventTime)
            .order_by_asc(reminder::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
