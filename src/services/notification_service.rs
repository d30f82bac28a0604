// src/services/notification_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::notification::{NewNotification, Notification},
};

#[derive(Clone)]
pub struct NotificationService {
    repo: Repository<Notification>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    pub async fn create_notification(
        &self,
        input: NewNotification,
    ) -> Result<Notification, AppError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            notification_type: input.notification_type,
            title: input.title,
            message: input.message,
            read: false,
            link: input.link,
            created_at: Utc::now(),
        };

        self.repo.save(&notification).await?;
        tracing::debug!("🔔 Notificação {} para {}", notification.id, notification.user_id);
        Ok(notification)
    }

    /// Mais recentes primeiro.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let mut notifications = self.repo.find_by("userId", user_id.to_string()).await?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Notification, AppError> {
        self.repo.get(id).await
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<Notification, AppError> {
        let mut notification = self.repo.get(id).await?;
        if !notification.read {
            notification.read = true;
            self.repo.save(&notification).await?;
        }
        Ok(notification)
    }

    /// Retorna quantas foram marcadas.
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Result<usize, AppError> {
        let mut marked = 0;
        for mut notification in self.list_for_user(user_id).await? {
            if !notification.read {
                notification.read = true;
                self.repo.save(&notification).await?;
                marked += 1;
            }
        }
        Ok(marked)
    }

    pub async fn delete_notification(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Notificação".to_string()));
        }
        Ok(())
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<usize, AppError> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    /// Apaga notificações lidas criadas antes de `now - days`. Não lidas ficam.
    pub async fn delete_read_older_than(
        &self,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let cutoff = now - Duration::days(days);
        let mut deleted = 0;

        for notification in self.repo.find_by("read", true).await? {
            if notification.created_at < cutoff && self.repo.delete(notification.id).await? {
                deleted += 1;
            }
        }

        tracing::info!("🧹 {} notificações lidas com mais de {} dias removidas", deleted, days);
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
