// src/bin/export.rs

use std::path::Path;

use chrono::Utc;

use izimo::{common::telemetry::init_tracing, config::Config, db, maintenance::export};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let store = db::open_store(&config).await?;

    let report = export::export_all(store, Path::new("."), Utc::now()).await?;

    println!("📊 Exportação gravada em {}", report.path.display());
    for (table, rows) in &report.exported {
        println!("   {:<15} {} linha(s)", table, rows);
    }
    if !report.failed.is_empty() {
        println!("   ⚠️ falharam: {}", report.failed.join(", "));
    }
    Ok(())
}
