//! Application state - shared across all handlers.

use std::sync::Arc;

use brawl_core::ports::{PasswordService, ReminderRepository, TokenService, UserRepository};
use brawl_core::{AuthService, ReminderService};
use brawl_infra::{
    Argon2PasswordService, InMemoryReminderRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use brawl_infra::{DatabaseConnections, PostgresReminderRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub reminders: Arc<ReminderService>,
}

type Stores = (Arc<dyn UserRepository>, Arc<dyn ReminderRepository>);

impl AppState {
    /// Build the application state, falling back to in-memory stores without a database.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, reminders) = Self::stores(config).await;

        tracing::info!("Application state initialized");
        Self::from_parts(users, reminders, &config.jwt)
    }

    /// State backed by in-memory stores.
    #[cfg(test)]
    pub fn in_memory(jwt: &JwtConfig) -> Self {
        Self::from_parts(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryReminderRepository::new()),
            jwt,
        )
    }

    fn from_parts(
        users: Arc<dyn UserRepository>,
        reminders: Arc<dyn ReminderRepository>,
        jwt: &JwtConfig,
    ) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt.clone()));

        Self {
            auth: Arc::new(AuthService::new(users, passwords, tokens)),
            reminders: Arc::new(ReminderService::new(reminders)),
        }
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> Stores {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return in_memory_stores();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(connections.main.clone()));
                let reminders: Arc<dyn ReminderRepository> =
                    Arc::new(PostgresReminderRepository::new(connections.main));
                (users, reminders)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                in_memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_config: &AppConfig) -> Stores {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        in_memory_stores()
    }
}

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryReminderRepository::new()),
    )
}
