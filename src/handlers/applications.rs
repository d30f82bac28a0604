// src/handlers/applications.rs

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
    models::application::{
        Application, ApplicationStatus, CreateApplicationPayload, UpdateApplicationStatusPayload,
    },
};

// POST /api/applications
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "Applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Criado", body = Application),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_application(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Só confirma que o imóvel existe; disponibilidade não é verificada
    app_state.property_service.get_property(payload.property_id).await?;

    let application = app_state
        .application_service
        .create_application(payload.property_id, user.id(), payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

// GET /api/applications/mine
#[utoipa::path(
    get,
    path = "/api/applications/mine",
    tag = "Applications",
    responses((status = 200, description = "OK", body = Vec<Application>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_applications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(app_state.application_service.list_by_applicant(user.id()).await?))
}

// PUT /api/applications/{id}/status
// O dono do imóvel decide; o candidato só pode desistir.
#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    tag = "Applications",
    params(("id" = Uuid, Path)),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "OK", body = Application),
        (status = 403, description = "Acesso negado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_application_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<Json<Application>, AppError> {
    let application = app_state.application_service.get_application(id).await?;

    let is_applicant_withdrawing = application.applicant_id == user.id()
        && payload.status == ApplicationStatus::Withdrawn;

    if !is_applicant_withdrawing {
        let property = app_state
            .property_service
            .get_property(application.property_id)
            .await?;
        user.ensure_owner(property.owner_id)?;
    }

    Ok(Json(
        app_state
            .application_service
            .update_status(id, payload.status)
            .await?,
    ))
}
