// src/db/store.rs

use std::{fmt, path::Path, str::FromStr};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::common::error::AppError;

/// Um registro armazenado: objeto JSON plano, sempre com um campo `id` string.
pub type Record = Map<String, Value>;

// ---
// As coleções nomeadas ("stores") do banco
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Properties,
    Applications,
    Tenancies,
    Documents,
    Messages,
    Notifications,
    Incidents,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Users,
        Collection::Properties,
        Collection::Applications,
        Collection::Tenancies,
        Collection::Documents,
        Collection::Messages,
        Collection::Notifications,
        Collection::Incidents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Properties => "properties",
            Collection::Applications => "applications",
            Collection::Tenancies => "tenancies",
            Collection::Documents => "documents",
            Collection::Messages => "messages",
            Collection::Notifications => "notifications",
            Collection::Incidents => "incidents",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Coleção '{}'", s)))
    }
}

/// Lê o `id` de um registro. Registros sem `id` string não vazio são rejeitados.
pub fn record_id(record: &Record) -> Result<&str, AppError> {
    match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id),
        _ => Err(AppError::InvalidRecord("campo 'id' ausente ou vazio".to_string())),
    }
}

/// O primitivo de armazenamento: coleções de registros endereçados por `id`.
///
/// `put` insere ou sobrescreve o registro inteiro (sem merge parcial, sem
/// controle de concorrência). Coleções ausentes são lidas como vazias.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>, AppError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>, AppError>;

    async fn put(&self, collection: Collection, record: Record) -> Result<(), AppError>;

    /// Retorna `true` se algo foi removido.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError>;

    async fn clear(&self, collection: Collection) -> Result<(), AppError>;

    /// Filtro por igualdade exata de um campo.
    async fn get_by_index(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Record>, AppError>;

    async fn count(&self, collection: Collection) -> Result<usize, AppError> {
        Ok(self.get_all(collection).await?.len())
    }

    /// Grava uma cópia do banco em `dest`.
    async fn backup(&self, dest: &Path) -> Result<(), AppError>;

    /// Extensão usada no arquivo de backup ("db" ou "json").
    fn backup_extension(&self) -> &'static str;
}

pub(crate) fn field_matches(record: &Record, field: &str, value: &Value) -> bool {
    record.get(field).unwrap_or(&Value::Null) == value
}
