// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Collection, Entity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Lease,
    Inventory,
    Receipt,
    Identity,
    IncomeProof,
    Insurance,
    Other,
}

// Referência a um arquivo, opcionalmente ligada a imóvel, locação ou candidatura
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub document_type: DocumentType,
    pub property_id: Option<Uuid>,
    pub tenancy_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Entity for Document {
    const COLLECTION: Collection = Collection::Documents;
    const LABEL: &'static str = "Documento";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "bail_signe.pdf")]
    pub name: String,
    #[validate(url(message = "URL inválida."))]
    pub url: String,
    pub document_type: DocumentType,
    pub property_id: Option<Uuid>,
    pub tenancy_id: Option<Uuid>,
    pub application_id: Option<Uuid>,
}
