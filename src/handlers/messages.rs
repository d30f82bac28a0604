// src/handlers/messages.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::message::{Message, SendMessagePayload, UnreadCount},
};

// POST /api/messages
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Criado", body = Message),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O destinatário precisa existir
    app_state.user_service.get_user(payload.receiver_id).await?;

    let message = app_state
        .message_service
        .send_message(user.id(), payload.receiver_id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/messages/conversation/{other}
#[utoipa::path(
    get,
    path = "/api/messages/conversation/{other}",
    tag = "Messages",
    params(("other" = Uuid, Path, description = "ID do outro participante")),
    responses((status = 200, description = "OK", body = Vec<Message>)),
    security(("api_jwt" = []))
)]
pub async fn get_conversation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(other): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(app_state.message_service.get_conversation(user.id(), other).await?))
}

// PUT /api/messages/conversation/{other}/read
#[utoipa::path(
    put,
    path = "/api/messages/conversation/{other}/read",
    tag = "Messages",
    params(("other" = Uuid, Path)),
    responses((status = 200, description = "OK", body = UnreadCount)),
    security(("api_jwt" = []))
)]
pub async fn mark_conversation_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(other): Path<Uuid>,
) -> Result<Json<UnreadCount>, AppError> {
    app_state
        .message_service
        .mark_conversation_read(user.id(), other)
        .await?;

    let count = app_state.message_service.unread_count(user.id()).await?;
    Ok(Json(UnreadCount { count }))
}

// GET /api/messages/unread-count
#[utoipa::path(
    get,
    path = "/api/messages/unread-count",
    tag = "Messages",
    responses((status = 200, description = "OK", body = UnreadCount)),
    security(("api_jwt" = []))
)]
pub async fn unread_count(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UnreadCount>, AppError> {
    let count = app_state.message_service.unread_count(user.id()).await?;
    Ok(Json(UnreadCount { count }))
}
