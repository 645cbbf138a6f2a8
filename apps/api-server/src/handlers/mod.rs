//! HTTP handlers and route configuration.

mod auth;
mod health;
mod reminders;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Malformed JSON bodies are answered like any other bad request.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        error::Error::from(AppError::BadRequest(format!("Invalid request body: {}", err)))
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            // Protected routes
            .service(
                web::scope("/events")
                    .route("", web::get().to(reminders::list))
                    .route("", web::post().to(reminders::create))
                    .route("/{id}", web::delete().to(reminders::delete)),
            ),
    );
}
