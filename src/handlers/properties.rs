// src/handlers/properties.rs

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
    handlers::documents,
    middleware::auth::AuthenticatedUser,
    models::{
        application::Application,
        auth::UserRole,
        document::Document,
        incident::Incident,
        property::{
            CreatePropertyPayload, Property, UpdatePropertyPayload, UpdatePropertyStatusPayload,
        },
        tenancy::Tenancy,
    },
};

// GET /api/properties
// Proprietário vê os seus, inquilino vê os disponíveis, admin vê tudo.
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    responses((status = 200, description = "OK", body = Vec<Property>)),
    security(("api_jwt" = []))
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let properties = match user.0.role {
        UserRole::Admin => app_state.property_service.list_properties().await?,
        UserRole::Owner => app_state.property_service.list_by_owner(user.id()).await?,
        UserRole::Tenant => app_state.property_service.list_available().await?,
    };
    Ok((StatusCode::OK, Json(properties)))
}

// POST /api/properties
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Properties",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Imóvel criado", body = Property),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    user.ensure_role(UserRole::Owner)?;
    payload.validate()?;

    let property = app_state
        .property_service
        .create_property(user.id(), payload)
        .await?;

    Ok((StatusCode::CREATED, Json(property)))
}

// GET /api/properties/{id}
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "OK", body = Property),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, AppError> {
    Ok(Json(app_state.property_service.get_property(id).await?))
}

// GET /api/properties/reference/{reference} (público)
#[utoipa::path(
    get,
    path = "/api/properties/reference/{reference}",
    tag = "Properties",
    params(("reference" = String, Path, description = "Código público, ex: IZ-4F7K2Q")),
    responses(
        (status = 200, description = "OK", body = Property),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_by_reference(
    State(app_state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Property>, AppError> {
    app_state
        .property_service
        .find_by_reference(&reference)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))
}

// PUT /api/properties/{id}
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    request_body = UpdatePropertyPayload,
    responses(
        (status = 200, description = "OK", body = Property),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyPayload>,
) -> Result<Json<Property>, AppError> {
    let property = app_state.property_service.get_property(id).await?;
    user.ensure_owner(property.owner_id)?;

    Ok(Json(app_state.property_service.update_property(id, payload).await?))
}

// PUT /api/properties/{id}/status
#[utoipa::path(
    put,
    path = "/api/properties/{id}/status",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    request_body = UpdatePropertyStatusPayload,
    responses((status = 200, description = "OK", body = Property)),
    security(("api_jwt" = []))
)]
pub async fn update_property_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyStatusPayload>,
) -> Result<Json<Property>, AppError> {
    let property = app_state.property_service.get_property(id).await?;
    user.ensure_owner(property.owner_id)?;

    Ok(Json(app_state.property_service.update_status(id, payload.status).await?))
}

// GET /api/properties/{id}/applications
#[utoipa::path(
    get,
    path = "/api/properties/{id}/applications",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    responses((status = 200, description = "OK", body = Vec<Application>)),
    security(("api_jwt" = []))
)]
pub async fn list_property_applications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Application>>, AppError> {
    let property = app_state.property_service.get_property(id).await?;
    user.ensure_owner(property.owner_id)?;

    Ok(Json(app_state.application_service.list_by_property(id).await?))
}

// GET /api/properties/{id}/tenancies
#[utoipa::path(
    get,
    path = "/api/properties/{id}/tenancies",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    responses((status = 200, description = "OK", body = Vec<Tenancy>)),
    security(("api_jwt" = []))
)]
pub async fn list_property_tenancies(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Tenancy>>, AppError> {
    let property = app_state.property_service.get_property(id).await?;
    user.ensure_owner(property.owner_id)?;

    Ok(Json(app_state.tenancy_service.list_by_property(id).await?))
}

// GET /api/properties/{id}/documents
#[utoipa::path(
    get,
    path = "/api/properties/{id}/documents",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "OK", body = Vec<Document>),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_property_documents(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, AppError> {
    let property = app_state.property_service.get_property(id).await?;
    let all = app_state.document_service.list_by_property(id).await?;

    if user.ensure_owner(property.owner_id).is_ok() {
        return Ok(Json(all));
    }

    // Demais usuários só veem o que lhes diz respeito
    let mut visible = Vec::new();
    for document in all {
        if documents::can_read(&app_state, &user, &document).await? {
            visible.push(document);
        }
    }
    Ok(Json(visible))
}

// GET /api/properties/{id}/incidents
#[utoipa::path(
    get,
    path = "/api/properties/{id}/incidents",
    tag = "Properties",
    params(("id" = Uuid, Path)),
    responses((status = 200, description = "OK", body = Vec<Incident>)),
    security(("api_jwt" = []))
)]
pub async fn list_property_incidents(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Incident>>, AppError> {
    Ok(Json(app_state.incident_service.list_by_property(id).await?))
}
