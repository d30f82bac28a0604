// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::{Collection, Entity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewMessage,
    ApplicationUpdate,
    TenancyUpdate,
    DocumentAdded,
    IncidentUpdate,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    // Link interno do app (ex: /properties/<id>)
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Notification {
    const COLLECTION: Collection = Collection::Notifications;
    const LABEL: &'static str = "Notificação";
    const FLAG_FIELDS: &'static [&'static str] = &["read"];

    fn id(&self) -> Uuid {
        self.id
    }
}

// Entrada interna: os serviços criam notificações, a API não.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}
