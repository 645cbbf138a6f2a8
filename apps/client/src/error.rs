//! Client error types.

/// Everything a client operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the stored token; it has been cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    /// The server answered with `{msg}`. Retrying may help.
    #[error("{msg} (HTTP {status})")]
    Api { status: u16, msg: String },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session file error: {0}")]
    Session(String),

    #[error("{0}")]
    InvalidInput(String),
}
