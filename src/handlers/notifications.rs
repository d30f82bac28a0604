// src/handlers/notifications.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{message::UnreadCount, notification::Notification},
};

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses((status = 200, description = "OK", body = Vec<Notification>)),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(app_state.notification_service.list_for_user(user.id()).await?))
}

// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "OK", body = Notification),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = app_state.notification_service.get_notification(id).await?;
    user.ensure_owner(notification.user_id)?;

    Ok(Json(app_state.notification_service.mark_as_read(id).await?))
}

// PUT /api/notifications/read-all
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses((status = 200, body = UnreadCount, description = "Quantas foram marcadas")),
    security(("api_jwt" = []))
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UnreadCount>, AppError> {
    let count = app_state.notification_service.mark_all_as_read(user.id()).await?;
    Ok(Json(UnreadCount { count }))
}

// DELETE /api/notifications/{id}
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Removido"),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_notification(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let notification = app_state.notification_service.get_notification(id).await?;
    user.ensure_owner(notification.user_id)?;

    app_state.notification_service.delete_notification(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
