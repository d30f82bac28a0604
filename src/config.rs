// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::{anyhow, Context};

use crate::{
    db::{self, Store},
    services::{
        ApplicationService, AuthService, DocumentService, IncidentService, MessageService,
        NotificationService, PropertyService, TenancyService, UserService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(anyhow!(
                "IZIMO_STORAGE inválido: '{}' (use 'memory' ou 'sqlite')",
                other
            )),
        }
    }
}

// Configuração lida do ambiente (.env incluído)
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: String,
    pub jwt_secret: Option<String>,
    pub addr: String,
    pub admin_email: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage = env::var("IZIMO_STORAGE")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse()?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw.parse().context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            storage,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://izimo.db".to_string()),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            addr: env::var("IZIMO_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@izimo.fr".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            bcrypt_cost,
        })
    }

    /// Configuração em memória para testes e ferramentas.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: Some("izimo-dev-secret".to_string()),
            addr: "127.0.0.1:0".to_string(),
            admin_email: "admin@izimo.fr".to_string(),
            admin_password: "admin123".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub property_service: PropertyService,
    pub application_service: ApplicationService,
    pub tenancy_service: TenancyService,
    pub document_service: DocumentService,
    pub message_service: MessageService,
    pub notification_service: NotificationService,
    pub incident_service: IncidentService,
}

impl AppState {
    /// Lê o ambiente, abre o banco e roda o seed do admin.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let store = db::open_store(&config).await?;
        db::init(store.clone(), &config).await?;
        Self::from_parts(store, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(store: Arc<dyn Store>, config: Config) -> anyhow::Result<Self> {
        let jwt_secret = config
            .jwt_secret
            .clone()
            .ok_or_else(|| anyhow!("JWT_SECRET deve ser definido"))?;

        let notification_service = NotificationService::new(store.clone());
        let user_service = UserService::new(store.clone(), config.bcrypt_cost);
        let auth_service = AuthService::new(user_service.clone(), jwt_secret);

        Ok(Self {
            auth_service,
            user_service,
            property_service: PropertyService::new(store.clone()),
            application_service: ApplicationService::new(
                store.clone(),
                notification_service.clone(),
            ),
            tenancy_service: TenancyService::new(store.clone(), notification_service.clone()),
            document_service: DocumentService::new(store.clone()),
            message_service: MessageService::new(store.clone(), notification_service.clone()),
            incident_service: IncidentService::new(store.clone(), notification_service.clone()),
            notification_service,
            store,
            config: Arc::new(config),
        })
    }
}
