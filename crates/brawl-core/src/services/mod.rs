//! Services - credential and ownership rules over the ports.

mod auth;
mod reminders;

#[cfg(test)]
pub(crate) mod fakes;

pub use auth::AuthService;
pub use reminders::ReminderService;
