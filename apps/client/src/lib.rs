//! # Brawl Client
//!
//! The desktop side of the reminder service: a session-aware gateway client,
//! the in-memory reminder board and the local notification scheduler.

pub mod config;
pub mod error;
pub mod gateway;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod state;

pub use config::ClientConfig;
pub use error::ClientError;
pub use gateway::GatewayClient;
pub use scheduler::{NotificationScheduler, SyncReport};
pub use session::Session;
pub use state::ReminderBoard;
