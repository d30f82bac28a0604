// src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Collection, Entity};

// Mensagem direcional. Não existe entidade "conversa": ela é o par remetente/destinatário.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Entity for Message {
    const COLLECTION: Collection = Collection::Messages;
    const LABEL: &'static str = "Mensagem";
    const FLAG_FIELDS: &'static [&'static str] = &["read"];

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Message {
    /// A mensagem pertence à conversa entre `a` e `b` (em qualquer sentido)?
    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub receiver_id: Uuid,
    #[validate(length(min = 1, max = 5000, message = "A mensagem não pode ser vazia."))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub count: usize,
}
