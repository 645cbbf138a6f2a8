//! # Brawl Infrastructure
//!
//! Concrete implementations of the ports defined in `brawl-core`.
//! This crate contains the stores, the credential primitives and the notifiers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `webhook` - Webhook notifier via reqwest

pub mod database;
pub mod notify;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{InMemoryReminderRepository, InMemoryUserRepository};
pub use notify::ConsoleNotifier;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresReminderRepository, PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "webhook")]
pub use notify::WebhookNotifier;
