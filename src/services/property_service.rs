// src/services/property_service.rs

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::property::{
        CreatePropertyPayload, Property, PropertyStatus, UpdatePropertyPayload,
    },
};

// Sem 0/O e 1/I para o código poder ser ditado por telefone
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const REFERENCE_LEN: usize = 6;
const REFERENCE_ATTEMPTS: usize = 10;

pub fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let code: String = (0..REFERENCE_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect();
    format!("IZ-{}", code)
}

#[derive(Clone)]
pub struct PropertyService {
    repo: Repository<Property>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    pub async fn create_property(
        &self,
        owner_id: Uuid,
        input: CreatePropertyPayload,
    ) -> Result<Property, AppError> {
        let reference = self.unique_reference().await?;
        let now = Utc::now();

        let property = Property {
            id: Uuid::new_v4(),
            reference,
            owner_id,
            title: input.title,
            description: input.description,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            property_type: input.property_type,
            surface: input.surface,
            rooms: input.rooms,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            floor: input.floor,
            furnished: input.furnished,
            energy_rating: input.energy_rating,
            ghg_rating: input.ghg_rating,
            rent: input.rent,
            charges: input.charges,
            deposit: input.deposit,
            status: PropertyStatus::Available,
            photos: input.photos,
            tenant_criteria: input.tenant_criteria,
            created_at: now,
            updated_at: now,
        };

        self.repo.save(&property).await?;
        tracing::info!("🏠 Imóvel {} criado ({})", property.reference, property.id);
        Ok(property)
    }

    async fn unique_reference(&self) -> Result<String, AppError> {
        for _ in 0..REFERENCE_ATTEMPTS {
            let candidate = generate_reference();
            if self.find_by_reference(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(anyhow::anyhow!("Não foi possível gerar uma referência única").into())
    }

    pub async fn get_property(&self, id: Uuid) -> Result<Property, AppError> {
        self.repo.get(id).await
    }

    /// Busca pública pelo código de referência.
    pub async fn find_by_reference(&self, reference: &str) -> Result<Option<Property>, AppError> {
        let reference = reference.trim().to_uppercase();
        Ok(self.repo.find_by("reference", reference).await?.into_iter().next())
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, AppError> {
        let mut properties = self.repo.list().await?;
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, AppError> {
        let mut properties = self.repo.find_by("ownerId", owner_id.to_string()).await?;
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }

    pub async fn list_available(&self) -> Result<Vec<Property>, AppError> {
        let mut properties = self
            .repo
            .find_by("status", PropertyStatus::Available.as_str())
            .await?;
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }

    pub async fn update_property(
        &self,
        id: Uuid,
        input: UpdatePropertyPayload,
    ) -> Result<Property, AppError> {
        let mut p = self.repo.get(id).await?;

        if let Some(v) = input.title {
            p.title = v;
        }
        if let Some(v) = input.description {
            p.description = v;
        }
        if let Some(v) = input.address {
            p.address = v;
        }
        if let Some(v) = input.city {
            p.city = v;
        }
        if let Some(v) = input.postal_code {
            p.postal_code = v;
        }
        if let Some(v) = input.property_type {
            p.property_type = v;
        }
        if let Some(v) = input.surface {
            p.surface = v;
        }
        if let Some(v) = input.rooms {
            p.rooms = v;
        }
        if let Some(v) = input.bedrooms {
            p.bedrooms = v;
        }
        if let Some(v) = input.bathrooms {
            p.bathrooms = v;
        }
        if let Some(v) = input.floor {
            p.floor = v;
        }
        if let Some(v) = input.furnished {
            p.furnished = v;
        }
        if let Some(v) = input.energy_rating {
            p.energy_rating = v;
        }
        if let Some(v) = input.ghg_rating {
            p.ghg_rating = v;
        }
        if let Some(v) = input.rent {
            p.rent = v;
        }
        if let Some(v) = input.charges {
            p.charges = v;
        }
        if let Some(v) = input.deposit {
            p.deposit = v;
        }
        if let Some(v) = input.photos {
            p.photos = v;
        }
        if let Some(v) = input.tenant_criteria {
            p.tenant_criteria = v;
        }

        p.updated_at = Utc::now();
        self.repo.save(&p).await?;
        Ok(p)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: PropertyStatus,
    ) -> Result<Property, AppError> {
        let mut property = self.repo.get(id).await?;
        property.status = status;
        property.updated_at = Utc::now();

        self.repo.save(&property).await?;
        tracing::info!("Imóvel {} agora está {}", property.reference, status.as_str());
        Ok(property)
    }

    pub async fn add_photo(&self, id: Uuid, url: String) -> Result<Property, AppError> {
        let mut property = self.repo.get(id).await?;
        property.photos.push(url);
        property.updated_at = Utc::now();

        self.repo.save(&property).await?;
        Ok(property)
    }

    pub async fn remove_photo(&self, id: Uuid, url: &str) -> Result<Property, AppError> {
        let mut property = self.repo.get(id).await?;
        property.photos.retain(|p| p != url);
        property.updated_at = Utc::now();

        self.repo.save(&property).await?;
        Ok(property)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
