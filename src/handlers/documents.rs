// src/handlers/documents.rs

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
    models::document::{CreateDocumentPayload, Document},
};

// Partes envolvidas em cada vínculo: dono do imóvel, inquilino ou candidato.
async fn linked_parties(
    app_state: &AppState,
    property_id: Option<Uuid>,
    tenancy_id: Option<Uuid>,
    application_id: Option<Uuid>,
) -> Result<Vec<Vec<Uuid>>, AppError> {
    let mut links = Vec::new();

    if let Some(property_id) = property_id {
        let property = app_state.property_service.get_property(property_id).await?;
        links.push(vec![property.owner_id]);
    }

    if let Some(tenancy_id) = tenancy_id {
        let tenancy = app_state.tenancy_service.get_tenancy(tenancy_id).await?;
        let property = app_state
            .property_service
            .get_property(tenancy.property_id)
            .await?;
        links.push(vec![tenancy.tenant_id, property.owner_id]);
    }

    if let Some(application_id) = application_id {
        let application = app_state
            .application_service
            .get_application(application_id)
            .await?;
        let property = app_state
            .property_service
            .get_property(application.property_id)
            .await?;
        links.push(vec![application.applicant_id, property.owner_id]);
    }

    Ok(links)
}

/// Leitura: admin, quem enviou, ou uma das partes de algum vínculo.
pub(crate) async fn can_read(
    app_state: &AppState,
    user: &AuthenticatedUser,
    document: &Document,
) -> Result<bool, AppError> {
    if user.is_admin() || document.uploaded_by == user.id() {
        return Ok(true);
    }

    let links = match linked_parties(
        app_state,
        document.property_id,
        document.tenancy_id,
        document.application_id,
    )
    .await
    {
        Ok(links) => links,
        // Vínculo removido não dá acesso a ninguém
        Err(AppError::NotFound(_)) => return Ok(false),
        Err(e) => return Err(e),
    };

    Ok(links.iter().any(|parties| parties.contains(&user.id())))
}

/// Criação: o usuário precisa ser parte de todos os vínculos informados.
pub(crate) async fn ensure_can_attach(
    app_state: &AppState,
    user: &AuthenticatedUser,
    payload: &CreateDocumentPayload,
) -> Result<(), AppError> {
    let links = linked_parties(
        app_state,
        payload.property_id,
        payload.tenancy_id,
        payload.application_id,
    )
    .await?;

    if user.is_admin() || links.iter().all(|parties| parties.contains(&user.id())) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

// POST /api/documents
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = CreateDocumentPayload,
    responses(
        (status = 201, description = "Criado", body = Document),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_can_attach(&app_state, &user, &payload).await?;

    let document = app_state
        .document_service
        .create_document(user.id(), payload)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/documents/{id}
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "OK", body = Document),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let document = app_state.document_service.get_document(id).await?;
    if !can_read(&app_state, &user, &document).await? {
        return Err(AppError::Forbidden);
    }

    Ok(Json(document))
}

// DELETE /api/documents/{id}
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Removido"),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let document = app_state.document_service.get_document(id).await?;
    user.ensure_owner(document.uploaded_by)?;

    app_state.document_service.delete_document(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
