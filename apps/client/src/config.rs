//! Client configuration: flags first, then environment, then defaults.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub notify_webhook: Option<String>,
}

impl ClientConfig {
    pub fn new(
        api_url: String,
        session_file: Option<PathBuf>,
        notify_webhook: Option<String>,
    ) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file: session_file.unwrap_or_else(default_session_file),
            notify_webhook: notify_webhook.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// `$HOME/.brawl/session.json`, or `.brawl/session.json` when HOME is unset.
pub fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".brawl")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_inputs() {
        let config = ClientConfig::new(
            "http://localhost:9000/".to_string(),
            Some(PathBuf::from("/tmp/s.json")),
            Some("  ".to_string()),
        );

        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert!(config.notify_webhook.is_none());
    }

    #[test]
    fn test_default_session_file() {
        let config = ClientConfig::new(DEFAULT_API_URL.to_string(), None, None);

        assert!(config.session_file.ends_with(".brawl/session.json"));
    }
}
