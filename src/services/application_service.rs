// src/services/application_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::{
        application::{Application, ApplicationStatus},
        notification::{NewNotification, NotificationType},
    },
    services::NotificationService,
};

#[derive(Clone)]
pub struct ApplicationService {
    repo: Repository<Application>,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>, notifications: NotificationService) -> Self {
        Self {
            repo: Repository::new(store),
            notifications,
        }
    }

    pub async fn create_application(
        &self,
        property_id: Uuid,
        applicant_id: Uuid,
        message: String,
    ) -> Result<Application, AppError> {
        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            property_id,
            applicant_id,
            status: ApplicationStatus::Submitted,
            message,
            created_at: now,
            updated_at: now,
        };

        self.repo.save(&application).await?;
        tracing::info!("📨 Candidatura {} ao imóvel {}", application.id, property_id);
        Ok(application)
    }

    pub async fn get_application(&self, id: Uuid) -> Result<Application, AppError> {
        self.repo.get(id).await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<Application>, AppError> {
        let mut applications = self.repo.find_by("propertyId", property_id.to_string()).await?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    pub async fn list_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        let mut applications = self.repo.find_by("applicantId", applicant_id.to_string()).await?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    /// Atualiza o status e avisa o candidato.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, AppError> {
        let mut application = self.repo.get(id).await?;
        application.status = status;
        application.updated_at = Utc::now();
        self.repo.save(&application).await?;

        let message = match status {
            ApplicationStatus::Accepted => "Votre candidature a été acceptée.",
            ApplicationStatus::Rejected => "Votre candidature n'a pas été retenue.",
            ApplicationStatus::UnderReview => "Votre candidature est en cours d'examen.",
            ApplicationStatus::Submitted | ApplicationStatus::Withdrawn => {
                return Ok(application);
            }
        };

        self.notifications
            .create_notification(NewNotification {
                user_id: application.applicant_id,
                notification_type: NotificationType::ApplicationUpdate,
                title: "Candidature mise à jour".to_string(),
                message: message.to_string(),
                link: Some(format!("/applications/{}", application.id)),
            })
            .await?;

        Ok(application)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
