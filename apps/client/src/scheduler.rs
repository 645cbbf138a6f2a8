//! Local notification scheduling.
//!
//! Each future reminder gets one deferred alert: a tokio task that sleeps until
//! the event time and then shows a notification. Alerts are keyed by reminder id,
//! so repeated syncs over the same list never stack duplicates.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use brawl_core::ports::{Notification, Notifier, Permission};
use brawl_shared::dto::ReminderResponse;

struct ArmedAlert {
    at: DateTime<Utc>,
    title: String,
    handle: JoinHandle<()>,
}

/// Outcome of one scheduling pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Newly armed alerts.
    pub armed: usize,
    /// Alerts already pending for an unchanged reminder.
    pub kept: usize,
    /// Pending alerts whose reminder was removed or changed.
    pub cancelled: usize,
    /// Reminders whose time had already passed.
    pub skipped: usize,
}

/// Arms, dedupes and cancels deferred reminder alerts.
pub struct NotificationScheduler {
    notifier: Arc<dyn Notifier>,
    /// Read by armed alerts when they fire, so alerts armed before `start` still show.
    permission: Arc<OnceLock<Permission>>,
    pending: HashMap<Uuid, ArmedAlert>,
}

impl NotificationScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            permission: Arc::new(OnceLock::new()),
            pending: HashMap::new(),
        }
    }

    /// Ask for notification permission. Only the first call reaches the notifier.
    pub async fn start(&mut self) -> Permission {
        if let Some(permission) = self.permission() {
            return permission;
        }

        let permission = self.notifier.request_permission().await;
        tracing::info!(?permission, "Notification permission");
        let _ = self.permission.set(permission);
        permission
    }

    pub fn permission(&self) -> Option<Permission> {
        self.permission.get().copied()
    }

    /// Schedule against the current wall clock.
    pub fn sync(&mut self, reminders: &[ReminderResponse]) -> SyncReport {
        self.sync_at(reminders, Utc::now())
    }

    /// One scheduling pass over the full reminder list, relative to `now`.
    pub fn sync_at(&mut self, reminders: &[ReminderResponse], now: DateTime<Utc>) -> SyncReport {
        let mut report = SyncReport::default();

        self.pending.retain(|_, alert| !alert.handle.is_finished());

        let mut upcoming: HashMap<Uuid, &ReminderResponse> = HashMap::new();
        for reminder in reminders {
            if reminder.event_time <= now {
                report.skipped += 1;
            } else {
                upcoming.insert(reminder.id, reminder);
            }
        }

        self.pending.retain(|id, alert| match upcoming.get(id) {
            Some(r) if r.event_time == alert.at && r.title == alert.title => true,
            _ => {
                alert.handle.abort();
                report.cancelled += 1;
                false
            }
        });

        for (id, reminder) in upcoming {
            if self.pending.contains_key(&id) {
                report.kept += 1;
                continue;
            }
            let Ok(delay) = (reminder.event_time - now).to_std() else {
                report.skipped += 1;
                continue;
            };
            let handle = self.arm(reminder.title.clone(), delay);
            self.pending.insert(
                id,
                ArmedAlert {
                    at: reminder.event_time,
                    title: reminder.title.clone(),
                    handle,
                },
            );
            report.armed += 1;
        }

        tracing::debug!(
            armed = report.armed,
            kept = report.kept,
            cancelled = report.cancelled,
            skipped = report.skipped,
            "Scheduling pass"
        );
        report
    }

    /// Number of alerts still waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|alert| !alert.handle.is_finished())
            .count()
    }

    /// Abort every pending alert.
    pub fn cancel_all(&mut self) {
        for (_, alert) in self.pending.drain() {
            alert.handle.abort();
        }
    }

    fn arm(&self, title: String, delay: std::time::Duration) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let permission = Arc::clone(&self.permission);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if permission.get() != Some(&Permission::Granted) {
                return;
            }
            if let Err(e) = notifier.show(Notification::reminder(&title)).await {
                tracing::debug!(error = %e, "Dropped reminder notification");
            }
        })
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use brawl_core::ports::NotifyError;
    use chrono::TimeDelta;

    use super::*;

    struct RecordingNotifier {
        permission: Permission,
        asked: Mutex<usize>,
        shown: Mutex<Vec<Notification>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new(permission: Permission) -> Arc<Self> {
            Arc::new(Self {
                permission,
                asked: Mutex::new(0),
                shown: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                permission: Permission::Granted,
                asked: Mutex::new(0),
                shown: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn shown(&self) -> Vec<Notification> {
            self.shown.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn request_permission(&self) -> Permission {
            *self.asked.lock().unwrap() += 1;
            self.permission
        }

        async fn show(&self, notification: Notification) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Delivery("no display".to_string()));
            }
            self.shown.lock().unwrap().push(notification);
            Ok(())
        }
    }

    fn reminder(title: &str, at: DateTime<Utc>) -> ReminderResponse {
        ReminderResponse {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            title: title.to_string(),
            event_time: at,
            created_at: at,
            updated_at: at,
        }
    }

    async fn scheduler_with(notifier: Arc<RecordingNotifier>) -> NotificationScheduler {
        let mut scheduler = NotificationScheduler::new(notifier);
        scheduler.start().await;
        scheduler
    }

    /// Let paused time run past `secs` and give fired tasks a chance to finish.
    async fn elapse(secs: u64) {
        tokio::time::sleep(Duration::from_secs(secs)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_reminder_notification() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();

        let report = scheduler.sync_at(&[reminder("Call mom", now + TimeDelta::minutes(5))], now);
        assert_eq!(report.armed, 1);
        assert_eq!(scheduler.pending(), 1);

        elapse(299).await;
        assert!(notifier.shown().is_empty());

        elapse(2).await;
        assert_eq!(notifier.shown(), vec![Notification::reminder("Call mom")]);
        assert_eq!(notifier.shown()[0].title, "Reminder!");
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_reminder_arms_nothing() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();

        let report = scheduler.sync_at(
            &[
                reminder("missed", now - TimeDelta::minutes(5)),
                reminder("right now", now),
            ],
            now,
        );

        assert_eq!(
            report,
            SyncReport {
                skipped: 2,
                ..SyncReport::default()
            }
        );
        assert_eq!(scheduler.pending(), 0);
        elapse(3600).await;
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resync_does_not_duplicate() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();
        let list = vec![reminder("Call mom", now + TimeDelta::minutes(5))];

        scheduler.sync_at(&list, now);
        let report = scheduler.sync_at(&list, now);
        let report_again = scheduler.sync_at(&list, now);

        assert_eq!(report.armed, 0);
        assert_eq!(report.kept, 1);
        assert_eq!(report_again.kept, 1);
        assert_eq!(scheduler.pending(), 1);

        elapse(301).await;
        assert_eq!(notifier.shown().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_reminder_is_cancelled() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();
        let keep = reminder("keep", now + TimeDelta::minutes(5));
        let dropped = reminder("dropped", now + TimeDelta::minutes(5));

        scheduler.sync_at(&[keep.clone(), dropped], now);
        let report = scheduler.sync_at(&[keep], now);

        assert_eq!(report.cancelled, 1);
        assert_eq!(report.kept, 1);

        elapse(301).await;
        assert_eq!(notifier.shown(), vec![Notification::reminder("keep")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moved_reminder_is_rearmed() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();
        let mut moved = reminder("standup", now + TimeDelta::minutes(5));

        scheduler.sync_at(std::slice::from_ref(&moved), now);
        moved.event_time = now + TimeDelta::minutes(10);
        let report = scheduler.sync_at(std::slice::from_ref(&moved), now);

        assert_eq!(report.cancelled, 1);
        assert_eq!(report.armed, 1);

        elapse(301).await;
        assert!(notifier.shown().is_empty());
        elapse(300).await;
        assert_eq!(notifier.shown().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_permission_fires_nothing() {
        let notifier = RecordingNotifier::new(Permission::Denied);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();

        scheduler.sync_at(&[reminder("Call mom", now + TimeDelta::minutes(5))], now);

        elapse(301).await;
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_armed_before_start_fires_once_granted() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = NotificationScheduler::new(notifier.clone());
        let now = Utc::now();

        scheduler.sync_at(&[reminder("Call mom", now + TimeDelta::minutes(5))], now);
        scheduler.start().await;

        elapse(301).await;
        assert_eq!(notifier.shown(), vec![Notification::reminder("Call mom")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_is_requested_once() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = NotificationScheduler::new(notifier.clone());
        assert!(scheduler.permission().is_none());

        scheduler.start().await;
        scheduler.start().await;

        assert_eq!(*notifier.asked.lock().unwrap(), 1);
        assert_eq!(scheduler.permission(), Some(Permission::Granted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_failure_is_swallowed() {
        let notifier = RecordingNotifier::failing();
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();

        scheduler.sync_at(&[reminder("Call mom", now + TimeDelta::seconds(10))], now);

        elapse(11).await;
        assert!(notifier.shown().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let notifier = RecordingNotifier::new(Permission::Granted);
        let mut scheduler = scheduler_with(notifier.clone()).await;
        let now = Utc::now();

        scheduler.sync_at(
            &[
                reminder("a", now + TimeDelta::minutes(1)),
                reminder("b", now + TimeDelta::minutes(2)),
            ],
            now,
        );
        scheduler.cancel_all();

        assert_eq!(scheduler.pending(), 0);
        elapse(600).await;
        assert!(notifier.shown().is_empty());
    }
}
