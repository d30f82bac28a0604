// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;
use super::store::{Collection, Record, Store};

/// Um tipo que vive numa coleção do `Store`.
///
/// `JSON_FIELDS` são gravados como texto JSON dentro do registro plano;
/// `FLAG_FIELDS` são booleanos gravados como inteiros 0/1.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
    /// Nome usado nas mensagens de erro ("Imóvel", "Usuário"...).
    const LABEL: &'static str;
    const JSON_FIELDS: &'static [&'static str] = &[];
    const FLAG_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;
}

/// Converte a entidade no registro plano que vai para o `Store`.
pub fn to_record<E: Entity>(entity: &E) -> Result<Record, AppError> {
    let mut record = match serde_json::to_value(entity)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::InvalidRecord(format!(
                "{} serializou para {} em vez de um objeto",
                E::LABEL,
                other
            )))
        }
    };

    for field in E::JSON_FIELDS {
        if let Some(value) = record.get_mut(*field) {
            if !value.is_null() {
                *value = Value::String(serde_json::to_string(value)?);
            }
        }
    }

    for field in E::FLAG_FIELDS {
        if let Some(value) = record.get_mut(*field) {
            if let Value::Bool(b) = value {
                *value = Value::from(*b as i64);
            }
        }
    }

    Ok(record)
}

/// Faz o caminho inverso: texto JSON volta a ser estrutura, 0/1 volta a ser booleano.
pub fn from_record<E: Entity>(mut record: Record) -> Result<E, AppError> {
    for field in E::JSON_FIELDS {
        if let Some(value) = record.get_mut(*field) {
            if let Value::String(text) = value {
                *value = serde_json::from_str(text)?;
            }
        }
    }

    for field in E::FLAG_FIELDS {
        if let Some(value) = record.get_mut(*field) {
            if let Value::Number(n) = value {
                *value = Value::Bool(n.as_f64().unwrap_or(0.0) != 0.0);
            }
        }
    }

    Ok(serde_json::from_value(Value::Object(record))?)
}

// O repositório genérico: o mapeamento entidade <-> registro para qualquer coleção.
pub struct Repository<E> {
    store: Arc<dyn Store>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn save(&self, entity: &E) -> Result<(), AppError> {
        let record = to_record(entity)?;
        self.store.put(E::COLLECTION, record).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, AppError> {
        self.store
            .get(E::COLLECTION, &id.to_string())
            .await?
            .map(from_record)
            .transpose()
    }

    /// Como `find_by_id`, mas a ausência vira `AppError::NotFound`.
    pub async fn get(&self, id: Uuid) -> Result<E, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(E::LABEL.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<E>, AppError> {
        self.store
            .get_all(E::COLLECTION)
            .await?
            .into_iter()
            .map(from_record)
            .collect()
    }

    /// Busca por igualdade de um campo. Booleanos em `FLAG_FIELDS` são
    /// convertidos para 0/1 antes da busca.
    pub async fn find_by(&self, field: &str, value: impl Into<Value>) -> Result<Vec<E>, AppError> {
        let mut value = value.into();
        if E::FLAG_FIELDS.iter().any(|f| *f == field) {
            if let Value::Bool(b) = value {
                value = Value::from(b as i64);
            }
        }

        self.store
            .get_by_index(E::COLLECTION, field, &value)
            .await?
            .into_iter()
            .map(from_record)
            .collect()
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.store.delete(E::COLLECTION, &id.to_string()).await
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.store.count(E::COLLECTION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        id: Uuid,
        tags: Vec<String>,
        extra: Option<Value>,
        read: bool,
    }

    impl Entity for Sample {
        const COLLECTION: Collection = Collection::Documents;
        const LABEL: &'static str = "Amostra";
        const JSON_FIELDS: &'static [&'static str] = &["tags", "extra"];
        const FLAG_FIELDS: &'static [&'static str] = &["read"];

        fn id(&self) -> Uuid {
            self.id
        }
    }

    #[test]
    fn packs_nested_fields_as_text_and_flags_as_integers() {
        let sample = Sample {
            id: Uuid::new_v4(),
            tags: vec!["a".into(), "b".into()],
            extra: None,
            read: true,
        };

        let record = to_record(&sample).unwrap();
        assert_eq!(record["tags"], Value::String(r#"["a","b"]"#.into()));
        assert_eq!(record["extra"], Value::Null);
        assert_eq!(record["read"], Value::from(1));

        let back: Sample = from_record(record).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn accepts_already_structured_values() {
        let id = Uuid::new_v4();
        let record = serde_json::json!({
            "id": id,
            "tags": ["x"],
            "extra": {"k": 1},
            "read": false,
        });
        let Value::Object(record) = record else { unreachable!() };

        let sample: Sample = from_record(record).unwrap();
        assert_eq!(sample.tags, vec!["x".to_string()]);
        assert_eq!(sample.extra, Some(serde_json::json!({"k": 1})));
        assert!(!sample.read);
    }
}
