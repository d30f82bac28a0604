// src/models/application.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Collection, Entity};

// Candidatura de um interessado a um imóvel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub property_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Application {
    const COLLECTION: Collection = Collection::Applications;
    const LABEL: &'static str = "Candidatura";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub property_id: Uuid,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Mensagem muito longa."))]
    #[schema(example = "Bonjour, je suis intéressée par votre appartement.")]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}
