//! HTTP client for the Brawl API.

use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use brawl_shared::dto::{
    CreateReminderRequest, LoginRequest, RegisterUserRequest, ReminderResponse, TokenResponse,
};
use brawl_shared::{ErrorResponse, MessageResponse};

use crate::error::ClientError;
use crate::session::Session;

const TOKEN_HEADER: &str = "x-auth-token";

/// Session-aware API client.
///
/// Authenticated calls attach the stored token. A `401` caused by the token
/// clears the session and surfaces [`ClientError::SessionExpired`]; an
/// ownership refusal keeps the session and surfaces as [`ClientError::Api`].
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Create an account and keep its token.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = RegisterUserRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await?;
        let TokenResponse { token } = decode(response).await?;

        self.session.store(token)?;
        tracing::info!("Registered and logged in");
        Ok(())
    }

    /// Exchange credentials for a token and keep it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;
        let TokenResponse { token } = decode(response).await?;

        self.session.store(token)?;
        tracing::info!("Logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.session.clear()
    }

    /// All reminders of the logged-in user, ascending by event time.
    pub async fn list(&mut self) -> Result<Vec<ReminderResponse>, ClientError> {
        let request = self.http.get(self.url("/api/events"));
        self.authed(request).await
    }

    pub async fn create(
        &mut self,
        title: &str,
        event_time: DateTime<Utc>,
    ) -> Result<ReminderResponse, ClientError> {
        let body = CreateReminderRequest {
            title: title.to_string(),
            event_time: Some(event_time.to_rfc3339()),
        };
        let request = self.http.post(self.url("/api/events")).json(&body);
        self.authed(request).await
    }

    /// Delete a reminder; returns the server's acknowledgement.
    pub async fn delete(&mut self, id: Uuid) -> Result<String, ClientError> {
        let request = self.http.delete(self.url(&format!("/api/events/{}", id)));
        let MessageResponse { msg } = self.authed(request).await?;
        Ok(msg)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authed<T: DeserializeOwned>(
        &mut self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let token = self.session.token().ok_or(ClientError::NotLoggedIn)?;
        let response = request.header(TOKEN_HEADER, token).send().await?;

        let status = response.status();
        if status != StatusCode::UNAUTHORIZED {
            return decode(response).await;
        }

        let body = response.text().await.unwrap_or_default();
        let token_failure = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.is_token_failure())
            .unwrap_or(true);
        if !token_failure {
            return Err(api_error(status, &body));
        }

        tracing::info!("Server rejected the session, clearing it");
        self.session.clear()?;
        Err(ClientError::SessionExpired)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

/// Turn a failed response into `ClientError::Api`, preferring the server's `msg`.
fn api_error(status: StatusCode, body: &str) -> ClientError {
    let msg = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.msg)
        .ok()
        .filter(|msg| !msg.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    ClientError::Api {
        status: status.as_u16(),
        msg,
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use brawl_shared::INVALID_TOKEN_MSG;

    use super::*;
    use crate::session::scratch_path;

    /// Serve one canned HTTP response and return the server's base URL.
    async fn canned_server(status: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn logged_in(path: &std::path::Path) -> Session {
        let mut session = Session::load(path).unwrap();
        session.store("valid-token".to_string()).unwrap();
        session
    }

    fn offline_client(session: Session) -> GatewayClient {
        // Port 9 (discard) is not expected to be listening.
        GatewayClient::new("http://127.0.0.1:9", session)
    }

    #[test]
    fn test_api_error_prefers_server_msg() {
        let err = api_error(StatusCode::BAD_REQUEST, r#"{"msg":"Invalid credentials"}"#);

        assert!(matches!(
            err,
            ClientError::Api { status: 400, ref msg } if msg == "Invalid credentials"
        ));
    }

    #[test]
    fn test_api_error_falls_back_to_body_then_reason() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
        assert!(matches!(err, ClientError::Api { ref msg, .. } if msg == "Server Error"));

        let err = api_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, ClientError::Api { ref msg, .. } if msg == "Not Found"));
    }

    #[tokio::test]
    async fn test_authed_calls_need_a_session() {
        let mut client = offline_client(Session::load(scratch_path()).unwrap());

        assert!(matches!(client.list().await, Err(ClientError::NotLoggedIn)));
        assert!(matches!(
            client.delete(Uuid::new_v4()).await,
            Err(ClientError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_the_session() {
        let mut session = Session::load(scratch_path()).unwrap();
        session.store("token".to_string()).unwrap();
        let mut client = offline_client(session);

        let result = client.list().await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
        assert!(client.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_invalid_token_expires_the_session() {
        let path = scratch_path();
        let body = serde_json::to_string(&ErrorResponse::new(INVALID_TOKEN_MSG)).unwrap();
        let url = canned_server("401 Unauthorized", body).await;
        let mut client = GatewayClient::new(url, logged_in(&path));

        let result = client.list().await;

        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert!(!client.session().is_logged_in());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_ownership_refusal_keeps_the_session() {
        let path = scratch_path();
        let body = serde_json::to_string(&ErrorResponse::new("User not authorized")).unwrap();
        let url = canned_server("401 Unauthorized", body).await;
        let mut client = GatewayClient::new(url, logged_in(&path));

        let result = client.delete(Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(ClientError::Api { status: 401, ref msg }) if msg == "User not authorized"
        ));
        assert!(client.session().is_logged_in());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_other_failures_keep_the_session() {
        let path = scratch_path();
        let body = serde_json::to_string(&ErrorResponse::new("Reminder not found")).unwrap();
        let url = canned_server("404 Not Found", body).await;
        let mut client = GatewayClient::new(url, logged_in(&path));

        let result = client.delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
        assert!(client.session().is_logged_in());
    }
}
