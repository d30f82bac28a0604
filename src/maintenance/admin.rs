// src/maintenance/admin.rs

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    common::{error::AppError, format::format_date},
    config::Config,
    db::{self, Collection, Repository, Store},
    models::{
        auth::User,
        property::Property,
    },
    services::NotificationService,
};

/// Notificações lidas mais velhas que isso são apagadas pelo `cleanupDatabase`.
pub const CLEANUP_AFTER_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    CreateAdmin,
    ListUsers,
    ListProperties,
    GetStats,
    CleanupDatabase,
    BackupDatabase,
}

impl AdminCommand {
    pub const ALL: [AdminCommand; 6] = [
        AdminCommand::CreateAdmin,
        AdminCommand::ListUsers,
        AdminCommand::ListProperties,
        AdminCommand::GetStats,
        AdminCommand::CleanupDatabase,
        AdminCommand::BackupDatabase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AdminCommand::CreateAdmin => "createAdmin",
            AdminCommand::ListUsers => "listUsers",
            AdminCommand::ListProperties => "listProperties",
            AdminCommand::GetStats => "getStats",
            AdminCommand::CleanupDatabase => "cleanupDatabase",
            AdminCommand::BackupDatabase => "backupDatabase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AdminCommand::CreateAdmin => "Cria o usuário admin (se ainda não existir)",
            AdminCommand::ListUsers => "Lista os usuários",
            AdminCommand::ListProperties => "Lista os imóveis",
            AdminCommand::GetStats => "Mostra a contagem de registros por tabela",
            AdminCommand::CleanupDatabase => "Apaga notificações lidas com mais de 30 dias",
            AdminCommand::BackupDatabase => "Copia o banco para backups/",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Texto com os comandos disponíveis, exibido quando o comando falta ou é desconhecido.
pub fn usage() -> String {
    let mut out = String::from("Comandos disponíveis:\n");
    for command in AdminCommand::ALL {
        out.push_str(&format!("  {:<16} {}\n", command.name(), command.description()));
    }
    out
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub counts: BTreeMap<&'static str, usize>,
    pub users_by_role: BTreeMap<&'static str, usize>,
    pub properties_by_status: BTreeMap<&'static str, usize>,
    pub unread_notifications: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Estatísticas do banco")?;
        for (table, count) in &self.counts {
            writeln!(f, "  {:<14} {}", table, count)?;
        }
        writeln!(f, "Usuários por papel:")?;
        for (role, count) in &self.users_by_role {
            writeln!(f, "  {:<14} {}", role, count)?;
        }
        writeln!(f, "Imóveis por status:")?;
        for (status, count) in &self.properties_by_status {
            writeln!(f, "  {:<14} {}", status, count)?;
        }
        write!(f, "Notificações não lidas: {}", self.unread_notifications)
    }
}

pub async fn create_admin(
    store: Arc<dyn Store>,
    config: &Config,
) -> Result<Option<User>, AppError> {
    db::init(store, config).await
}

pub async fn list_users(store: Arc<dyn Store>) -> Result<Vec<User>, AppError> {
    let mut users = Repository::<User>::new(store).list().await?;
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(users)
}

pub async fn list_properties(store: Arc<dyn Store>) -> Result<Vec<Property>, AppError> {
    let mut properties = Repository::<Property>::new(store).list().await?;
    properties.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(properties)
}

pub async fn get_stats(store: Arc<dyn Store>) -> Result<Stats, AppError> {
    let mut stats = Stats::default();

    for collection in Collection::ALL {
        stats.counts.insert(collection.as_str(), store.count(collection).await?);
    }

    for user in list_users(store.clone()).await? {
        *stats.users_by_role.entry(user.role.as_str()).or_default() += 1;
    }

    for property in list_properties(store.clone()).await? {
        *stats.properties_by_status.entry(property.status.as_str()).or_default() += 1;
    }

    stats.unread_notifications = store
        .get_by_index(Collection::Notifications, "read", &serde_json::Value::from(0))
        .await?
        .len();

    Ok(stats)
}

/// Apaga só as notificações lidas **e** com mais de 30 dias.
pub async fn cleanup_database(
    store: Arc<dyn Store>,
    now: DateTime<Utc>,
) -> Result<usize, AppError> {
    NotificationService::new(store)
        .delete_read_older_than(CLEANUP_AFTER_DAYS, now)
        .await
}

/// `izimo_backup_20260314_092653_123.db`: carimbo com milissegundos.
pub fn backup_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("izimo_backup_{}.{}", now.format("%Y%m%d_%H%M%S_%3f"), extension)
}

/// Grava um snapshot do banco em `dir` e retorna o caminho do arquivo.
pub async fn backup_database(
    store: Arc<dyn Store>,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(dir).await?;
    let dest = dir.join(backup_file_name(now, store.backup_extension()));

    store.backup(&dest).await?;
    tracing::info!("💾 Backup gravado em {}", dest.display());
    Ok(dest)
}

/// Executa um comando e imprime o resultado no terminal.
pub async fn run(
    command: AdminCommand,
    store: Arc<dyn Store>,
    config: &Config,
    backup_dir: &Path,
) -> Result<(), AppError> {
    match command {
        AdminCommand::CreateAdmin => match create_admin(store, config).await? {
            Some(admin) => println!("✅ Admin criado: {} ({})", admin.email, admin.id),
            None => println!("ℹ️ O admin {} já existe", config.admin_email),
        },
        AdminCommand::ListUsers => {
            let users = list_users(store).await?;
            println!("{} usuário(s)", users.len());
            for user in users {
                println!(
                    "  {}  {:<30} {:<24} {:<7} {}",
                    user.id,
                    user.email,
                    user.full_name(),
                    user.role.as_str(),
                    format_date(user.created_at)
                );
            }
        }
        AdminCommand::ListProperties => {
            let properties = list_properties(store).await?;
            println!("{} imóvel(is)", properties.len());
            for p in properties {
                println!(
                    "  {}  {:<30} {:<20} {:>10} € {}",
                    p.reference,
                    p.title,
                    p.city,
                    p.total_rent(),
                    p.status.as_str()
                );
            }
        }
        AdminCommand::GetStats => println!("{}", get_stats(store).await?),
        AdminCommand::CleanupDatabase => {
            let deleted = cleanup_database(store, Utc::now()).await?;
            println!("🧹 {} notificação(ões) removida(s)", deleted);
        }
        AdminCommand::BackupDatabase => {
            let path = backup_database(store, backup_dir, Utc::now()).await?;
            println!("💾 Backup: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_by_name() {
        for command in AdminCommand::ALL {
            assert_eq!(AdminCommand::parse(command.name()), Some(command));
        }
        assert_eq!(AdminCommand::parse("dropEverything"), None);
        assert_eq!(AdminCommand::parse(""), None);
    }

    #[test]
    fn usage_lists_all_commands() {
        let text = usage();
        for command in AdminCommand::ALL {
            assert!(text.contains(command.name()));
        }
    }
}
