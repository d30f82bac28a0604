// src/services/incident_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::{
        incident::{CreateIncidentPayload, Incident, IncidentStatus},
        notification::{NewNotification, NotificationType},
    },
    services::NotificationService,
};

#[derive(Clone)]
pub struct IncidentService {
    repo: Repository<Incident>,
    notifications: NotificationService,
}

impl IncidentService {
    pub fn new(store: Arc<dyn Store>, notifications: NotificationService) -> Self {
        Self {
            repo: Repository::new(store),
            notifications,
        }
    }

    pub async fn create_incident(
        &self,
        reported_by: Uuid,
        input: CreateIncidentPayload,
    ) -> Result<Incident, AppError> {
        let status = if input.submit {
            IncidentStatus::Reported
        } else {
            IncidentStatus::Draft
        };

        let now = Utc::now();
        let incident = Incident {
            id: Uuid::new_v4(),
            property_id: input.property_id,
            tenancy_id: input.tenancy_id,
            reported_by,
            title: input.title,
            description: input.description,
            room: input.room,
            incident_type: input.incident_type,
            status,
            created_at: now,
            updated_at: now,
        };

        self.repo.save(&incident).await?;
        tracing::info!("🛠️ Incidente {} criado como {}", incident.id, status);
        Ok(incident)
    }

    pub async fn get_incident(&self, id: Uuid) -> Result<Incident, AppError> {
        self.repo.get(id).await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<Incident>, AppError> {
        let mut incidents = self.repo.find_by("propertyId", property_id.to_string()).await?;
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(incidents)
    }

    pub async fn list_by_reporter(&self, user_id: Uuid) -> Result<Vec<Incident>, AppError> {
        let mut incidents = self.repo.find_by("reportedBy", user_id.to_string()).await?;
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(incidents)
    }

    /// Move o incidente para `next`, recusando transições fora do ciclo de vida.
    pub async fn transition(&self, id: Uuid, next: IncidentStatus) -> Result<Incident, AppError> {
        let mut incident = self.repo.get(id).await?;
        let current = incident.status;

        if !current.can_transition_to(next) {
            tracing::warn!("Transição recusada para o incidente {}: {} -> {}", id, current, next);
            return Err(AppError::InvalidTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        incident.status = next;
        incident.updated_at = Utc::now();
        self.repo.save(&incident).await?;

        self.notifications
            .create_notification(NewNotification {
                user_id: incident.reported_by,
                notification_type: NotificationType::IncidentUpdate,
                title: incident.title.clone(),
                message: format!("Statut : {}", next.label()),
                link: Some(format!("/incidents/{}", incident.id)),
            })
            .await?;

        Ok(incident)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
