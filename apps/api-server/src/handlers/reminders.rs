//! Reminder handlers. All routes require an `Identity`.

use actix_web::{HttpResponse, web};

use brawl_core::domain::Reminder;
use brawl_shared::MessageResponse;
use brawl_shared::dto::{CreateReminderRequest, ReminderResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(reminder: Reminder) -> ReminderResponse {
    ReminderResponse {
        id: reminder.id,
        owner_id: reminder.owner_id,
        title: reminder.title,
        event_time: reminder.event_time,
        created_at: reminder.created_at,
        updated_at: reminder.updated_at,
    }
}

/// GET /api/events
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let reminders = state.reminders.list(identity.user_id).await?;
    let body: Vec<ReminderResponse> = reminders.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/events
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateReminderRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let reminder = state
        .reminders
        .create(identity.user_id, &req.title, req.event_time.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(to_response(reminder)))
}

/// DELETE /api/events/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .reminders
        .delete(identity.user_id, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Reminder removed")))
}
