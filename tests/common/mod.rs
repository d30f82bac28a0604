#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use izimo::{
    config::{AppState, Config},
    db::{MemoryStore, SqliteStore, Store},
    models::{
        auth::{RegisterUserPayload, User, UserRole},
        property::{CreatePropertyPayload, Property},
    },
};

/// bcrypt no custo mínimo, senão os testes ficam lentos.
pub fn test_config() -> Config {
    Config {
        bcrypt_cost: 4,
        ..Config::in_memory()
    }
}

pub fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

pub async fn sqlite_store() -> Arc<dyn Store> {
    Arc::new(
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("sqlite em memória"),
    )
}

pub fn state(store: Arc<dyn Store>) -> AppState {
    AppState::from_parts(store, test_config()).expect("estado de teste")
}

pub async fn register(state: &AppState, email: &str, role: UserRole) -> (String, User) {
    state
        .auth_service
        .register_user(RegisterUserPayload {
            email: email.to_string(),
            password: "secret123".to_string(),
            first_name: "Marie".to_string(),
            last_name: "Dupont".to_string(),
            phone: None,
            role,
        })
        .await
        .expect("registro")
}

pub fn property_payload(title: &str) -> CreatePropertyPayload {
    serde_json::from_value(json!({
        "title": title,
        "address": "12 rue de la Paix",
        "city": "Lyon",
        "postalCode": "69002",
        "propertyType": "apartment",
        "surface": 48.5,
        "rooms": 2,
        "bedrooms": 1,
        "bathrooms": 1,
        "furnished": true,
        "rent": 850.0,
        "charges": 60.0,
        "deposit": 850.0,
        "photos": ["https://cdn.izimo.fr/a.jpg", "https://cdn.izimo.fr/b.jpg"]
    }))
    .expect("payload de imóvel")
}

pub async fn create_property(state: &AppState, owner: &User, title: &str) -> Property {
    state
        .property_service
        .create_property(owner.id, property_payload(title))
        .await
        .expect("imóvel")
}
