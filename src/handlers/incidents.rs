// src/handlers/incidents.rs

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
    models::incident::{CreateIncidentPayload, Incident, IncidentStatus, TransitionIncidentPayload},
};

// POST /api/incidents
#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = "Incidents",
    request_body = CreateIncidentPayload,
    responses(
        (status = 201, description = "Criado", body = Incident),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_incident(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateIncidentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    app_state.property_service.get_property(payload.property_id).await?;

    let incident = app_state
        .incident_service
        .create_incident(user.id(), payload)
        .await?;

    Ok((StatusCode::CREATED, Json(incident)))
}

// GET /api/incidents/{id}
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = "Incidents",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "OK", body = Incident),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_incident(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Incident>, AppError> {
    Ok(Json(app_state.incident_service.get_incident(id).await?))
}

// PUT /api/incidents/{id}/status
// Cancelamento do inquilino só por quem reportou; o resto pelo dono do imóvel.
#[utoipa::path(
    put,
    path = "/api/incidents/{id}/status",
    tag = "Incidents",
    params(("id" = Uuid, Path)),
    request_body = TransitionIncidentPayload,
    responses(
        (status = 200, description = "OK", body = Incident),
        (status = 403, description = "Acesso negado"),
        (status = 409, description = "Transição não permitida")
    ),
    security(("api_jwt" = []))
)]
pub async fn transition_incident(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionIncidentPayload>,
) -> Result<Json<Incident>, AppError> {
    let incident = app_state.incident_service.get_incident(id).await?;

    match payload.status {
        IncidentStatus::Reported | IncidentStatus::CancelledTenant => {
            user.ensure_owner(incident.reported_by)?;
        }
        _ => {
            let property = app_state
                .property_service
                .get_property(incident.property_id)
                .await?;
            user.ensure_owner(property.owner_id)?;
        }
    }

    Ok(Json(
        app_state
            .incident_service
            .transition(id, payload.status)
            .await?,
    ))
}
