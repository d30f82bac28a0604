// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, LoginUserPayload, NotificationPreferences, RegisterUserPayload,
        UpdateUserPayload, UserProfile,
    },
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = AuthResponse),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (token, user) = app_state.auth_service.register_user(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses((status = 200, description = "OK", body = UserProfile)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserProfile> {
    Json(user.into())
}

// PUT /api/users/me
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    request_body = UpdateUserPayload,
    responses((status = 200, description = "OK", body = UserProfile)),
    security(("api_jwt" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<UserProfile>, AppError> {
    payload.validate()?;

    let updated = app_state.user_service.update_user(user.id(), payload).await?;
    Ok(Json(updated.into()))
}

// PUT /api/users/me/notification-preferences
#[utoipa::path(
    put,
    path = "/api/users/me/notification-preferences",
    tag = "Users",
    request_body = NotificationPreferences,
    responses((status = 200, description = "OK", body = UserProfile)),
    security(("api_jwt" = []))
)]
pub async fn update_notification_preferences(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(preferences): Json<NotificationPreferences>,
) -> Result<Json<UserProfile>, AppError> {
    let updated = app_state
        .user_service
        .update_notification_preferences(user.id(), preferences)
        .await?;
    Ok(Json(updated.into()))
}
