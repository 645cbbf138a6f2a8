//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller, resolved from the `x-auth-token` header.
///
/// Handlers that take an `Identity` are protected; the owner id they act on
/// always comes from here, never from the request body.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AppError::Internal("AppState not found in app data".to_string()));
    };

    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .map(|value| value.to_str().map(str::trim).unwrap_or_default())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::MissingToken)?;

    match state.auth.verify(token) {
        Ok(user_id) => Ok(Identity { user_id }),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            Err(AppError::InvalidToken)
        }
    }
}
