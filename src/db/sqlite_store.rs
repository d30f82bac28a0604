// src/db/sqlite_store.rs

use std::{path::Path, str::FromStr, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::common::error::AppError;
use super::store::{field_matches, record_id, Collection, Record, Store};

/// Backend relacional: uma tabela por coleção (`id TEXT PRIMARY KEY, data TEXT`),
/// com o registro inteiro guardado como JSON em `data`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Abre a pool e roda as migrações embarcadas.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let in_memory = database_url.contains(":memory:");

        let mut opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if !in_memory {
            opts = opts.journal_mode(SqliteJournalMode::Wal);
        }

        // Cada conexão `:memory:` é um banco diferente, então usamos só uma.
        let max_connections = if in_memory { 1 } else { 5 };

        let mut pool_opts = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3));
        if in_memory {
            // Fechar a conexão apagaria o banco
            pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_opts.connect_with(opts).await?;

        sqlx::migrate!().run(&pool).await?;
        tracing::info!("✅ Banco SQLite pronto ({})", database_url);

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn decode_rows(rows: Vec<(String,)>) -> Result<Vec<Record>, AppError> {
        rows.into_iter()
            .map(|(data,)| serde_json::from_str::<Record>(&data).map_err(AppError::from))
            .collect()
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>, AppError> {
        let sql = format!("SELECT data FROM {} ORDER BY id", collection.as_str());
        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Self::decode_rows(rows)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>, AppError> {
        let sql = format!("SELECT data FROM {} WHERE id = ?1", collection.as_str());
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(data,)| serde_json::from_str::<Record>(&data).map_err(AppError::from))
            .transpose()
    }

    async fn put(&self, collection: Collection, record: Record) -> Result<(), AppError> {
        let id = record_id(&record)?.to_string();
        let data = serde_json::to_string(&record)?;

        let sql = format!(
            r#"
            INSERT INTO {} (id, data) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET data = excluded.data
            "#,
            collection.as_str()
        );
        sqlx::query(&sql)
            .bind(&id)
            .bind(&data)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", collection.as_str());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, collection: Collection) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {}", collection.as_str());
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn get_by_index(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Record>, AppError> {
        let table = collection.as_str();
        let path = format!("$.\"{}\"", field.replace('"', ""));
        let sql = format!(
            "SELECT data FROM {} WHERE json_extract(data, ?1) = ?2 ORDER BY id",
            table
        );

        // Escalares filtram no SQL; o resto cai num scan completo.
        let rows: Vec<(String,)> = match value {
            Value::String(s) => {
                sqlx::query_as(&sql).bind(&path).bind(s).fetch_all(&self.pool).await?
            }
            Value::Bool(b) => {
                sqlx::query_as(&sql).bind(&path).bind(*b).fetch_all(&self.pool).await?
            }
            Value::Number(n) if n.is_i64() => {
                let n = n.as_i64().unwrap_or_default();
                sqlx::query_as(&sql).bind(&path).bind(n).fetch_all(&self.pool).await?
            }
            Value::Number(n) if n.is_f64() => {
                let n = n.as_f64().unwrap_or_default();
                sqlx::query_as(&sql).bind(&path).bind(n).fetch_all(&self.pool).await?
            }
            // Inteiros acima de i64::MAX não cabem num bind do SQLite
            Value::Null | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                let all = format!("SELECT data FROM {} ORDER BY id", table);
                sqlx::query_as(&all).fetch_all(&self.pool).await?
            }
        };

        // O SQLite compara `true` com 1; conferimos a igualdade JSON exata.
        Ok(Self::decode_rows(rows)?
            .into_iter()
            .filter(|r| field_matches(r, field, value))
            .collect())
    }

    async fn count(&self, collection: Collection) -> Result<usize, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.as_str());
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count as usize)
    }

    async fn backup(&self, dest: &Path) -> Result<(), AppError> {
        let dest = dest.to_string_lossy().to_string();
        sqlx::query("VACUUM INTO ?1")
            .bind(&dest)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backup_extension(&self) -> &'static str {
        "db"
    }
}
