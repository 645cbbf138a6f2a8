//! Client-side reminder state.

use chrono::{Local, NaiveDate, TimeZone};
use uuid::Uuid;

use brawl_shared::dto::ReminderResponse;

/// The reminder list as last seen from the server, ascending by event time.
#[derive(Debug, Default)]
pub struct ReminderBoard {
    reminders: Vec<ReminderResponse>,
}

impl ReminderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[ReminderResponse] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Swap in a fresh list from the server.
    pub fn replace(&mut self, mut reminders: Vec<ReminderResponse>) {
        reminders.sort_by_key(|r| r.event_time);
        self.reminders = reminders;
    }

    /// Add a just-created reminder in its sorted position.
    pub fn push(&mut self, reminder: ReminderResponse) {
        let at = self
            .reminders
            .partition_point(|r| r.event_time <= reminder.event_time);
        self.reminders.insert(at, reminder);
    }

    /// Drop a deleted reminder. Returns whether it was present.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        self.reminders.len() != before
    }

    /// Reminders falling on `day` in local time.
    pub fn on_day(&self, day: NaiveDate) -> Vec<&ReminderResponse> {
        self.on_day_in(day, &Local)
    }

    pub fn on_day_in<Tz: TimeZone>(&self, day: NaiveDate, zone: &Tz) -> Vec<&ReminderResponse> {
        self.reminders
            .iter()
            .filter(|r| r.event_time.with_timezone(zone).date_naive() == day)
            .collect()
    }
}
