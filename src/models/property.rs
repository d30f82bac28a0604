// src/models/property.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Collection, Entity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Occupied,
    Maintenance,
    Archived,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Occupied => "occupied",
            PropertyStatus::Maintenance => "maintenance",
            PropertyStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Loft,
    Room,
    Parking,
    Other,
}

// Classes do DPE (energia) e GES (emissões)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum EnergyClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

// Critérios do inquilino (texto JSON no registro)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantCriteria {
    pub min_income: Option<Decimal>,
    pub guarantor_required: bool,
    pub pets_allowed: bool,
    pub smoking_allowed: bool,
    pub max_occupants: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    // Código público usado na busca (ex: IZ-4F7K2Q)
    pub reference: String,
    pub owner_id: Uuid,

    pub title: String,
    pub description: Option<String>,

    pub address: String,
    pub city: String,
    pub postal_code: String,

    pub property_type: PropertyType,
    pub surface: f64,
    pub rooms: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub floor: Option<i32>,
    pub furnished: bool,
    pub energy_rating: Option<EnergyClass>,
    pub ghg_rating: Option<EnergyClass>,

    pub rent: Decimal,
    pub charges: Decimal,
    pub deposit: Decimal,

    pub status: PropertyStatus,
    #[serde(default)]
    pub photos: Vec<String>,
    pub tenant_criteria: Option<TenantCriteria>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Property {
    const COLLECTION: Collection = Collection::Properties;
    const LABEL: &'static str = "Imóvel";
    const JSON_FIELDS: &'static [&'static str] = &["photos", "tenantCriteria"];
    const FLAG_FIELDS: &'static [&'static str] = &["furnished"];

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Property {
    /// Aluguel com encargos.
    pub fn total_rent(&self) -> Decimal {
        self.rent + self.charges
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "T2 lumineux proche du centre")]
    pub title: String,
    pub description: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub address: String,
    #[validate(length(min = 1, message = "required"))]
    pub city: String,
    #[validate(length(min = 1, message = "required"))]
    pub postal_code: String,

    pub property_type: PropertyType,
    #[validate(range(min = 0.0, message = "A superfície não pode ser negativa."))]
    pub surface: f64,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    pub floor: Option<i32>,
    #[serde(default)]
    pub furnished: bool,
    pub energy_rating: Option<EnergyClass>,
    pub ghg_rating: Option<EnergyClass>,

    pub rent: Decimal,
    #[serde(default)]
    pub charges: Decimal,
    #[serde(default)]
    pub deposit: Decimal,

    #[serde(default)]
    #[schema(example = json!(["https://cdn.izimo.fr/a.jpg"]))]
    pub photos: Vec<String>,
    pub tenant_criteria: Option<TenantCriteria>,
}

// Campo ausente vira None; `null` explícito vira Some(None) e limpa o valor.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// Atualização parcial: só os campos presentes são alterados
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyPayload {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub property_type: Option<PropertyType>,
    pub surface: Option<f64>,
    pub rooms: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>)]
    pub floor: Option<Option<i32>>,
    pub furnished: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<EnergyClass>)]
    pub energy_rating: Option<Option<EnergyClass>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<EnergyClass>)]
    pub ghg_rating: Option<Option<EnergyClass>>,
    pub rent: Option<Decimal>,
    pub charges: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub photos: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<TenantCriteria>)]
    pub tenant_criteria: Option<Option<TenantCriteria>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePropertyStatusPayload {
    pub status: PropertyStatus,
}
