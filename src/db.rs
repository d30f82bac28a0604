pub mod store;
pub use store::{Collection, Record, Store};
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod sqlite_store;
pub use sqlite_store::SqliteStore;
pub mod repository;
pub use repository::{Entity, Repository};

use std::sync::Arc;

use crate::{
    common::error::AppError,
    config::{Config, StorageBackend},
    models::auth::{NewUser, User, UserRole},
    services::UserService,
};

/// Abre o backend escolhido pela configuração.
pub async fn open_store(config: &Config) -> Result<Arc<dyn Store>, AppError> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("🧠 Usando armazenamento em memória (nada será persistido)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStore::connect(&config.database_url).await?)),
    }
}

/// Seed idempotente: cria o admin só se nenhum usuário tiver o e-mail configurado.
/// Retorna o admin criado, ou `None` se ele já existia.
pub async fn init(store: Arc<dyn Store>, config: &Config) -> Result<Option<User>, AppError> {
    let users = UserService::new(store, config.bcrypt_cost);

    if users.find_by_email(&config.admin_email).await?.is_some() {
        tracing::debug!("Admin {} já existe, seed ignorado", config.admin_email);
        return Ok(None);
    }

    let admin = users
        .create_user(NewUser {
            email: config.admin_email.clone(),
            password: config.admin_password.clone(),
            first_name: "Admin".to_string(),
            last_name: "Izimo".to_string(),
            phone: None,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!("👤 Usuário admin criado: {}", admin.email);
    Ok(Some(admin))
}
