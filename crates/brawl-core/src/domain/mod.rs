//! Domain entities - the core business objects.

mod reminder;
mod user;

pub use reminder::Reminder;
pub use user::{User, normalize_email};
