// src/bin/init_db.rs

use izimo::{common::telemetry::init_tracing, config::Config, db};

async fn initialize() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let store = db::open_store(&config).await?;

    match db::init(store, &config).await? {
        Some(admin) => tracing::info!("✅ Banco inicializado, admin {} criado", admin.email),
        None => tracing::info!("✅ Banco inicializado, admin já existente"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = initialize().await {
        tracing::error!("❌ Falha ao inicializar o banco: {:#}", e);
        std::process::exit(1);
    }
}
