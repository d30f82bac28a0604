// src/models/tenancy.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::{Collection, Entity};

// ---
// Tenancy (A "Locação")
// ---
// Liga um inquilino a um imóvel por um período
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenancyStatus {
    Pending,
    Active,
    Ended,
    Terminated,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenancy {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rent: Decimal,
    pub status: TenancyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tenancy {
    const COLLECTION: Collection = Collection::Tenancies;
    const LABEL: &'static str = "Locação";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenancyPayload {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    #[schema(example = "2026-11-01")]
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    // Se ausente, usa o aluguel do imóvel
    pub rent: Option<Decimal>,
    pub status: Option<TenancyStatus>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndTenancyPayload {
    pub end_date: NaiveDate,
}
