//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod notifier;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use notifier::{Notification, Notifier, NotifyError, Permission};
pub use repository::{BaseRepository, ReminderRepository, UserRepository};
