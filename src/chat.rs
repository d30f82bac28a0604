// src/chat.rs
//
// Mensageria simulada da interface: contatos e mensagens vivem só em memória,
// sem entrega real entre usuários. Nada aqui é persistido.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Tenant,
    Applicant,
}

impl ContactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ContactKind::Tenant => "tenant",
            ContactKind::Applicant => "applicant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub contact_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    // `true` quando fui eu (o proprietário) que enviei
    pub from_me: bool,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub kind: ContactKind,
    pub name: String,
    pub property_name: Option<String>,
    pub last_message: Option<ChatMessage>,
    pub unread_count: usize,
}

/// `tenant_5` e `5` geram o mesmo id: o prefixo existente é removido antes.
pub fn generate_contact_id(kind: ContactKind, raw_id: &str) -> String {
    let prefix = format!("{}_", kind.prefix());
    let bare = raw_id.strip_prefix(&prefix).unwrap_or(raw_id);
    format!("{}{}", prefix, bare)
}

/// Mais recente primeiro. Sem última mensagem conta como época (vai para o fim).
pub fn sort_contacts_by_last_message(contacts: &mut [Contact]) {
    contacts.sort_by_key(|c| {
        std::cmp::Reverse(
            c.last_message
                .as_ref()
                .map(|m| m.timestamp)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    });
}

/// Filtra por tipo e por nome (sem diferenciar maiúsculas).
pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    kind: Option<ContactKind>,
    query: &str,
) -> Vec<&'a Contact> {
    let query = query.trim().to_lowercase();
    contacts
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind == k))
        .filter(|c| {
            query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.property_name
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&query))
        })
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct ChatState {
    contacts: Vec<Contact>,
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dados de demonstração da tela de mensagens.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut state = Self::new();
        state.add_contact(ContactKind::Tenant, "1", "Marie Dupont", Some("T2 Lyon Centre"));
        state.add_contact(ContactKind::Tenant, "2", "Julien Martin", Some("Maison Villeurbanne"));
        state.add_contact(
            ContactKind::Applicant,
            "3",
            "Sophie Bernard",
            Some("Studio Croix-Rousse"),
        );

        let marie = generate_contact_id(ContactKind::Tenant, "1");
        let sophie = generate_contact_id(ContactKind::Applicant, "3");

        state.push(
            &marie,
            "Bonjour, le radiateur de la chambre ne chauffe plus.",
            now - Duration::hours(5),
            false,
            true,
        );
        state.push(
            &marie,
            "Je passe demain matin pour regarder.",
            now - Duration::hours(4),
            true,
            true,
        );
        state.push(
            &sophie,
            "Le studio est-il toujours disponible ?",
            now - Duration::minutes(30),
            false,
            false,
        );
        state
    }

    pub fn add_contact(
        &mut self,
        kind: ContactKind,
        raw_id: &str,
        name: &str,
        property_name: Option<&str>,
    ) -> String {
        let id = generate_contact_id(kind, raw_id);
        if !self.contacts.iter().any(|c| c.id == id) {
            self.contacts.push(Contact {
                id: id.clone(),
                kind,
                name: name.to_string(),
                property_name: property_name.map(str::to_string),
                last_message: None,
                unread_count: 0,
            });
        }
        id
    }

    /// Contatos ordenados pela última mensagem.
    pub fn contacts(&self) -> Vec<Contact> {
        let mut contacts = self.contacts.clone();
        sort_contacts_by_last_message(&mut contacts);
        contacts
    }

    /// Mensagens do contato em ordem cronológica.
    pub fn messages_for(&self, contact_id: &str) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .iter()
            .filter(|m| m.contact_id == contact_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    pub fn send_message(
        &mut self,
        contact_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<ChatMessage, AppError> {
        self.ensure_contact(contact_id)?;
        Ok(self.push(contact_id, content, now, true, true))
    }

    /// Mensagem chegando do contato (entra como não lida).
    pub fn receive_message(
        &mut self,
        contact_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<ChatMessage, AppError> {
        self.ensure_contact(contact_id)?;
        Ok(self.push(contact_id, content, now, false, false))
    }

    pub fn mark_contact_read(&mut self, contact_id: &str) {
        for message in self.messages.iter_mut().filter(|m| m.contact_id == contact_id) {
            message.read = true;
        }
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == contact_id) {
            contact.unread_count = 0;
            if let Some(last) = contact.last_message.as_mut() {
                last.read = true;
            }
        }
    }

    pub fn total_unread(&self) -> usize {
        self.contacts.iter().map(|c| c.unread_count).sum()
    }

    fn ensure_contact(&self, contact_id: &str) -> Result<(), AppError> {
        if self.contacts.iter().any(|c| c.id == contact_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Contato {}", contact_id)))
        }
    }

    fn push(
        &mut self,
        contact_id: &str,
        content: &str,
        timestamp: DateTime<Utc>,
        from_me: bool,
        read: bool,
    ) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage {
            id: format!("msg_{}", self.next_id),
            contact_id: contact_id.to_string(),
            content: content.to_string(),
            timestamp,
            from_me,
            read,
        };
        self.messages.push(message.clone());

        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == contact_id) {
            let is_newer = contact
                .last_message
                .as_ref()
                .is_none_or(|last| last.timestamp <= timestamp);
            if is_newer {
                contact.last_message = Some(message.clone());
            }
            if !read {
                contact.unread_count += 1;
            }
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, last: Option<DateTime<Utc>>) -> Contact {
        Contact {
            id: id.to_string(),
            kind: ContactKind::Tenant,
            name: id.to_string(),
            property_name: None,
            last_message: last.map(|timestamp| ChatMessage {
                id: format!("m-{}", id),
                contact_id: id.to_string(),
                content: String::new(),
                timestamp,
                from_me: false,
                read: true,
            }),
            unread_count: 0,
        }
    }

    #[test]
    fn contact_id_prefix_is_idempotent() {
        assert_eq!(generate_contact_id(ContactKind::Tenant, "tenant_5"), "tenant_5");
        assert_eq!(generate_contact_id(ContactKind::Tenant, "5"), "tenant_5");
        assert_eq!(generate_contact_id(ContactKind::Applicant, "applicant_9"), "applicant_9");
        // prefixo de outro tipo não é removido
        assert_eq!(generate_contact_id(ContactKind::Applicant, "tenant_5"), "applicant_tenant_5");
    }

    #[test]
    fn sorts_by_last_message_with_missing_last() {
        let now = Utc::now();
        let mut contacts = vec![
            contact("old", Some(now - Duration::days(2))),
            contact("none", None),
            contact("new", Some(now)),
        ];
        sort_contacts_by_last_message(&mut contacts);

        let ids: Vec<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["new", "old", "none"]);
    }

    #[test]
    fn filters_by_kind_and_query() {
        let state = ChatState::seeded(Utc::now());
        let contacts = state.contacts();

        let tenants = filter_contacts(&contacts, Some(ContactKind::Tenant), "");
        assert_eq!(tenants.len(), 2);

        let found = filter_contacts(&contacts, None, "sophie");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "applicant_3");

        let by_property = filter_contacts(&contacts, None, "villeurbanne");
        assert_eq!(by_property[0].name, "Julien Martin");
    }

    #[test]
    fn sending_updates_last_message_and_order() {
        let now = Utc::now();
        let mut state = ChatState::seeded(now);

        state.send_message("tenant_2", "Bonjour Julien", now + Duration::minutes(1)).unwrap();
        let contacts = state.contacts();
        assert_eq!(contacts[0].id, "tenant_2");
        assert_eq!(contacts[0].last_message.as_ref().unwrap().content, "Bonjour Julien");

        assert!(state.send_message("tenant_99", "?", now).is_err());
    }

    #[test]
    fn unread_counts_and_mark_read() {
        let now = Utc::now();
        let mut state = ChatState::seeded(now);
        assert_eq!(state.total_unread(), 1);

        state.receive_message("tenant_1", "Merci !", now).unwrap();
        assert_eq!(state.total_unread(), 2);

        state.mark_contact_read("tenant_1");
        state.mark_contact_read("applicant_3");
        assert_eq!(state.total_unread(), 0);
        assert!(state.messages_for("tenant_1").iter().all(|m| m.read));
    }

    #[test]
    fn messages_are_chronological() {
        let state = ChatState::seeded(Utc::now());
        let messages = state.messages_for("tenant_1");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].timestamp < messages[1].timestamp);
        assert!(messages[1].from_me);
    }
}
