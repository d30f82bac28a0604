// src/db/memory_store.rs

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::common::error::AppError;
use super::store::{field_matches, record_id, Collection, Record, Store};

/// Backend em memória: um mapa ordenado por `id` para cada coleção.
/// Nada é persistido; o backup grava um snapshot JSON.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).and_then(|records| records.get(id).cloned()))
    }

    async fn put(&self, collection: Collection, record: Record) -> Result<(), AppError> {
        let id = record_id(&record)?.to_string();
        let mut guard = self.collections.write().await;
        guard.entry(collection).or_default().insert(id, record);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError> {
        let mut guard = self.collections.write().await;
        Ok(guard
            .get_mut(&collection)
            .map(|records| records.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn clear(&self, collection: Collection) -> Result<(), AppError> {
        let mut guard = self.collections.write().await;
        guard.remove(&collection);
        Ok(())
    }

    async fn get_by_index(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Record>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|records| {
                records
                    .values()
                    .filter(|r| field_matches(r, field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: Collection) -> Result<usize, AppError> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).map(BTreeMap::len).unwrap_or(0))
    }

    async fn backup(&self, dest: &Path) -> Result<(), AppError> {
        let snapshot: BTreeMap<&'static str, Vec<Record>> = {
            let guard = self.collections.read().await;
            Collection::ALL
                .iter()
                .map(|c| {
                    let rows = guard
                        .get(c)
                        .map(|records| records.values().cloned().collect())
                        .unwrap_or_default();
                    (c.as_str(), rows)
                })
                .collect()
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(dest, json).await?;
        Ok(())
    }

    fn backup_extension(&self) -> &'static str {
        "json"
    }
}
