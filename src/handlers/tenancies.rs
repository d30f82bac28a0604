// src/handlers/tenancies.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::tenancy::{CreateTenancyPayload, EndTenancyPayload, Tenancy, TenancyStatus},
    services::NewTenancy,
};

// POST /api/tenancies
#[utoipa::path(
    post,
    path = "/api/tenancies",
    tag = "Tenancies",
    request_body = CreateTenancyPayload,
    responses(
        (status = 201, description = "Criado", body = Tenancy),
        (status = 403, description = "Acesso negado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tenancy(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTenancyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state.property_service.get_property(payload.property_id).await?;
    user.ensure_owner(property.owner_id)?;

    let tenancy = app_state
        .tenancy_service
        .create_tenancy(NewTenancy {
            property_id: property.id,
            tenant_id: payload.tenant_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            rent: payload.rent.unwrap_or_else(|| property.total_rent()),
            status: payload.status.unwrap_or(TenancyStatus::Active),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(tenancy)))
}

// GET /api/tenancies/mine
#[utoipa::path(
    get,
    path = "/api/tenancies/mine",
    tag = "Tenancies",
    responses((status = 200, description = "OK", body = Vec<Tenancy>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_tenancies(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Tenancy>>, AppError> {
    Ok(Json(app_state.tenancy_service.list_by_tenant(user.id()).await?))
}

// GET /api/tenancies/active
#[utoipa::path(
    get,
    path = "/api/tenancies/active",
    tag = "Tenancies",
    responses(
        (status = 200, description = "OK", body = Tenancy),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_active_tenancy(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Tenancy>, AppError> {
    app_state
        .tenancy_service
        .find_active_for_tenant(user.id())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Locação ativa".to_string()))
}

// PUT /api/tenancies/{id}/end
#[utoipa::path(
    put,
    path = "/api/tenancies/{id}/end",
    tag = "Tenancies",
    params(("id" = Uuid, Path)),
    request_body = EndTenancyPayload,
    responses(
        (status = 200, description = "OK", body = Tenancy),
        (status = 403, description = "Acesso negado")
    ),
    security(("api_jwt" = []))
)]
pub async fn end_tenancy(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EndTenancyPayload>,
) -> Result<Json<Tenancy>, AppError> {
    let tenancy = app_state.tenancy_service.get_tenancy(id).await?;
    let property = app_state.property_service.get_property(tenancy.property_id).await?;
    user.ensure_owner(property.owner_id)?;

    Ok(Json(app_state.tenancy_service.end_tenancy(id, payload.end_date).await?))
}
