// src/bin/admin.rs

use std::path::PathBuf;

use clap::Parser;

use izimo::{
    common::telemetry::init_tracing,
    config::Config,
    db,
    maintenance::admin::{self, AdminCommand},
};

#[derive(Parser)]
#[command(name = "izimo-admin", about = "Tarefas de manutenção do Izimo")]
struct Cli {
    /// createAdmin, listUsers, listProperties, getStats, cleanupDatabase ou backupDatabase
    command: Option<String>,

    /// Pasta onde o backupDatabase grava o arquivo
    #[arg(long, value_name = "PATH", default_value = "backups")]
    backup_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command.as_deref().and_then(AdminCommand::parse) else {
        if let Some(unknown) = &cli.command {
            eprintln!("Comando desconhecido: {}", unknown);
        }
        println!("{}", admin::usage());
        return Ok(());
    };

    let config = Config::from_env()?;
    let store = db::open_store(&config).await?;

    // Falha num comando é reportada, mas não muda o código de saída
    if let Err(e) = admin::run(command, store, &config, &cli.backup_dir).await {
        tracing::error!("❌ {} falhou: {}", command.name(), e);
    }
    Ok(())
}
