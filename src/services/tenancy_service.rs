// src/services/tenancy_service.rs

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::{
        notification::{NewNotification, NotificationType},
        tenancy::{Tenancy, TenancyStatus},
    },
    services::NotificationService,
};

// Dados para abrir uma locação
#[derive(Debug, Clone)]
pub struct NewTenancy {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rent: Decimal,
    pub status: TenancyStatus,
}

#[derive(Clone)]
pub struct TenancyService {
    repo: Repository<Tenancy>,
    notifications: NotificationService,
}

impl TenancyService {
    pub fn new(store: Arc<dyn Store>, notifications: NotificationService) -> Self {
        Self {
            repo: Repository::new(store),
            notifications,
        }
    }

    pub async fn create_tenancy(&self, input: NewTenancy) -> Result<Tenancy, AppError> {
        let now = Utc::now();
        let tenancy = Tenancy {
            id: Uuid::new_v4(),
            property_id: input.property_id,
            tenant_id: input.tenant_id,
            start_date: input.start_date,
            end_date: input.end_date,
            rent: input.rent,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        self.repo.save(&tenancy).await?;

        self.notifications
            .create_notification(NewNotification {
                user_id: tenancy.tenant_id,
                notification_type: NotificationType::TenancyUpdate,
                title: "Nouvelle location".to_string(),
                message: format!(
                    "Votre location débute le {}.",
                    tenancy.start_date.format("%d/%m/%Y")
                ),
                link: Some(format!("/tenancies/{}", tenancy.id)),
            })
            .await?;

        tracing::info!("🔑 Locação {} criada para {}", tenancy.id, tenancy.tenant_id);
        Ok(tenancy)
    }

    pub async fn get_tenancy(&self, id: Uuid) -> Result<Tenancy, AppError> {
        self.repo.get(id).await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<Tenancy>, AppError> {
        let mut tenancies = self.repo.find_by("propertyId", property_id.to_string()).await?;
        tenancies.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(tenancies)
    }

    pub async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Tenancy>, AppError> {
        let mut tenancies = self.repo.find_by("tenantId", tenant_id.to_string()).await?;
        tenancies.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(tenancies)
    }

    /// A locação ativa do inquilino. Nada impede que existam várias:
    /// nesse caso vence a de início mais recente e registramos um aviso.
    pub async fn find_active_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<Tenancy>, AppError> {
        let active: Vec<Tenancy> = self
            .list_by_tenant(tenant_id)
            .await?
            .into_iter()
            .filter(|t| t.status == TenancyStatus::Active)
            .collect();

        if active.len() > 1 {
            tracing::warn!(
                "⚠️ Inquilino {} tem {} locações ativas; usando a mais recente",
                tenant_id,
                active.len()
            );
        }

        // `list_by_tenant` já ordena por início decrescente
        Ok(active.into_iter().next())
    }

    pub async fn end_tenancy(&self, id: Uuid, end_date: NaiveDate) -> Result<Tenancy, AppError> {
        let mut tenancy = self.repo.get(id).await?;
        tenancy.end_date = Some(end_date);
        tenancy.status = TenancyStatus::Ended;
        tenancy.updated_at = Utc::now();
        self.repo.save(&tenancy).await?;

        self.notifications
            .create_notification(NewNotification {
                user_id: tenancy.tenant_id,
                notification_type: NotificationType::TenancyUpdate,
                title: "Fin de location".to_string(),
                message: format!("Votre location se termine le {}.", end_date.format("%d/%m/%Y")),
                link: Some(format!("/tenancies/{}", tenancy.id)),
            })
            .await?;

        Ok(tenancy)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TenancyStatus,
    ) -> Result<Tenancy, AppError> {
        let mut tenancy = self.repo.get(id).await?;
        tenancy.status = status;
        tenancy.updated_at = Utc::now();
        self.repo.save(&tenancy).await?;
        Ok(tenancy)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
