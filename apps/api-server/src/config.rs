//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use brawl_infra::JwtConfig;
use brawl_infra::database::DatabaseConfig;

/// Configuration that must not be started with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when RUST_ENV is production")]
    DefaultSecretInProduction,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset or unparsable values fall back to defaults.
    ///
    /// The built-in JWT secret is refused in production and only warned about elsewhere.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let parsed = |key: &str, default| parse_or(lookup(key), default);

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS", 100),
                min_connections: parsed("DB_MIN_CONNECTIONS", 10),
            });

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parse_or(lookup("JWT_EXPIRATION_HOURS"), defaults.expiration_hours),
            issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        if jwt.uses_default_secret() {
            let is_production = lookup("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
                return Err(ConfigError::DefaultSecretInProduction);
            }
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup("PORT"), 8080),
            database,
            jwt,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn try_config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        try_config_from(pairs).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.expiration_hours, 24);
        assert_eq!(config.jwt.issuer, "brawl-api");
        assert!(config.jwt.uses_default_secret());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/brawl"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION_HOURS", "2"),
        ]);

        assert_eq!(config.port, 9000);
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/brawl");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expiration_hours, 2);
    }

    #[test]
    fn test_garbage_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("DATABASE_URL", "  ")]);

        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_default_secret_is_refused_in_production() {
        let err = try_config_from(&[("RUST_ENV", "production")]).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultSecretInProduction));

        let config = config_from(&[("RUST_ENV", "production"), ("JWT_SECRET", "s3cret")]);
        assert_eq!(config.jwt.secret, "s3cret");

        assert!(try_config_from(&[("RUST_ENV", "development")]).is_ok());
    }
}
