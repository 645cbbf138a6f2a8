//! Authentication handlers.

use actix_web::{HttpResponse, web};

use brawl_shared::dto::{LoginRequest, RegisterUserRequest, TokenResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let token = state.auth.register(&req.email, &req.password).await?;

    Ok(HttpResponse::Created().json(TokenResponse { token }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let token = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
