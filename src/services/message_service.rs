// src/services/message_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::{
        message::Message,
        notification::{NewNotification, NotificationType},
    },
    services::NotificationService,
};

const PREVIEW_LEN: usize = 80;

#[derive(Clone)]
pub struct MessageService {
    repo: Repository<Message>,
    notifications: NotificationService,
}

impl MessageService {
    pub fn new(store: Arc<dyn Store>, notifications: NotificationService) -> Self {
        Self {
            repo: Repository::new(store),
            notifications,
        }
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<Message, AppError> {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            timestamp: Utc::now(),
            read: false,
        };
        self.repo.save(&message).await?;

        let preview: String = message.content.chars().take(PREVIEW_LEN).collect();
        self.notifications
            .create_notification(NewNotification {
                user_id: receiver_id,
                notification_type: NotificationType::NewMessage,
                title: "Nouveau message".to_string(),
                message: preview,
                link: Some(format!("/messages/{}", sender_id)),
            })
            .await?;

        Ok(message)
    }

    /// Mensagens entre dois usuários, em ordem cronológica.
    pub async fn get_conversation(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, AppError> {
        let mut messages: Vec<Message> = self
            .repo
            .find_by("senderId", a.to_string())
            .await?
            .into_iter()
            .chain(self.repo.find_by("senderId", b.to_string()).await?)
            .filter(|m| m.is_between(a, b))
            .collect();

        // a == b traz as mesmas mensagens duas vezes
        messages.sort_by(|x, y| x.timestamp.cmp(&y.timestamp).then(x.id.cmp(&y.id)));
        messages.dedup_by_key(|m| m.id);
        Ok(messages)
    }

    /// Todas as mensagens enviadas ou recebidas, mais recentes primeiro.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Message>, AppError> {
        let mut messages = self.repo.find_by("senderId", user_id.to_string()).await?;
        messages.extend(
            self.repo
                .find_by("receiverId", user_id.to_string())
                .await?
                .into_iter()
                .filter(|m| m.sender_id != user_id),
        );
        messages.sort_by(|x, y| y.timestamp.cmp(&x.timestamp));
        Ok(messages)
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<Message, AppError> {
        let mut message = self.repo.get(id).await?;
        if !message.read {
            message.read = true;
            self.repo.save(&message).await?;
        }
        Ok(message)
    }

    /// Marca como lidas as mensagens que `other` enviou para `reader`.
    pub async fn mark_conversation_read(
        &self,
        reader: Uuid,
        other: Uuid,
    ) -> Result<usize, AppError> {
        let mut marked = 0;
        for mut message in self.repo.find_by("receiverId", reader.to_string()).await? {
            if message.sender_id == other && !message.read {
                message.read = true;
                self.repo.save(&message).await?;
                marked += 1;
            }
        }
        Ok(marked)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<usize, AppError> {
        Ok(self
            .repo
            .find_by("receiverId", user_id.to_string())
            .await?
            .iter()
            .filter(|m| !m.read)
            .count())
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.repo.count().await
    }
}
