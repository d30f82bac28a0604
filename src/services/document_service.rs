// src/services/document_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::document::{CreateDocumentPayload, Document},
};

#[derive(Clone)]
pub struct DocumentService {
    repo: Repository<Document>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    pub async fn create_document(
        &self,
        uploaded_by: Uuid,
        input: CreateDocumentPayload,
    ) -> Result<Document, AppError> {
        let document = Document {
            id: Uuid::new_v4(),
            name: input.name,
            url: input.url,
            document_type: input.document_type,
            property_id: input.property_id,
            tenancy_id: input.tenancy_id,
            application_id: input.application_id,
            uploaded_by,
            created_at: Utc::now(),
        };

        self.repo.save(&document).await?;
        tracing::info!("📄 Documento {} ({:?}) salvo", document.id, document.document_type);
        Ok(document)
    }

    pub async fn get_document(&self, id: Uuid) -> Result<Document, AppError> {
        self.repo.get(id).await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<Document>, AppError> {
        self.list_by("propertyId", property_id).await
    }

    pub async fn list_by_tenancy(&self, tenancy_id: Uuid) -> Result<Vec<Document>, AppError> {
        self.list_by("tenancyId", tenancy_id).await
    }

    pub async fn list_by_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<Document>, AppError> {
        self.list_by("applicationId", application_id).await
    }

    async fn list_by(&self, field: &str, id: Uuid) -> Result<Vec<Document>, AppError> {
        let mut documents = self.repo.find_by(field, id.to_string()).await?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    pub async fn delete_document(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Documento".to_string()));
        }
        tracing::info!("🗑️ Documento {} removido", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
