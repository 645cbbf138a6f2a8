use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Reminder;
use crate::error::{DomainError, RepoError};
use crate::ports::ReminderRepository;

const MISSING_FIELDS: &str = "Please provide a title and event time";
const INVALID_EVENT_TIME: &str = "Invalid event time";
const INVALID_ID: &str = "Invalid reminder id";

/// Ownership-scoped reminder operations.
pub struct ReminderService {
    reminders: Arc<dyn ReminderRepository>,
}

impl ReminderService {
    pub fn new(reminders: Arc<dyn ReminderRepository>) -> Self {
        Self { reminders }
    }

    /// Every reminder of `owner_id`, ascending by event time.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Reminder>, DomainError> {
        let reminders = self.reminders.find_by_owner(owner_id).await?;
        tracing::debug!(owner_id = %owner_id, count = reminders.len(), "Listed reminders");
        Ok(reminders)
    }

    /// Store a new reminder for `owner_id`.
    ///
    /// `event_time` must be an RFC 3339 instant; any offset is normalized to UTC.
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        event_time: Option<&str>,
    ) -> Result<Reminder, DomainError> {
        let title = title.trim();
        let event_time = event_time.map(str::trim).filter(|s| !s.is_empty());
        let (false, Some(event_time)) = (title.is_empty(), event_time) else {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        };
        let event_time = parse_instant(event_time)
            .ok_or_else(|| DomainError::Validation(INVALID_EVENT_TIME.to_string()))?;

        let reminder = self
            .reminders
            .insert(Reminder::new(owner_id, title.to_string(), event_time))
            .await?;

        tracing::info!(
            owner_id = %owner_id,
            reminder_id = %reminder.id,
            event_time = %reminder.event_time,
            "Reminder created"
        );
        Ok(reminder)
    }

    /// Delete a reminder on behalf of `owner_id`.
    ///
    /// The id is validated before any lookup. Existence is checked before ownership,
    /// so a missing reminder is `NotFound` and someone else's is `Forbidden`.
    pub async fn delete(&self, owner_id: Uuid, reminder_id: &str) -> Result<(), DomainError> {
        let id = Uuid::parse_str(reminder_id.trim())
            .map_err(|_| DomainError::Validation(INVALID_ID.to_string()))?;

        let not_found = || DomainError::NotFound {
            entity_type: "Reminder",
            id,
        };

        let reminder = self.reminders.find_by_id(id).await?.ok_or_else(not_found)?;

        if !reminder.is_owned_by(owner_id) {
            tracing::warn!(
                caller = %owner_id,
                reminder_id = %id,
                "Refused to delete reminder owned by another user"
            );
            return Err(DomainError::Forbidden);
        }

        match self.reminders.delete(id).await {
            Ok(()) => {
                tracing::info!(owner_id = %owner_id, reminder_id = %id, "Reminder deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
