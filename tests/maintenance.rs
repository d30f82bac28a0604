mod common;

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use izimo::{
    common::error::AppError,
    db::{self, Collection, Record, Repository, Store},
    maintenance::{admin, export},
    models::{
        auth::UserRole,
        notification::{Notification, NotificationType},
    },
};

fn notification(user_id: Uuid, read: bool, age_days: i64) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id,
        notification_type: NotificationType::System,
        title: "Info".to_string(),
        message: "...".to_string(),
        read,
        link: None,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

#[tokio::test]
async fn admin_seed_is_idempotent() {
    let store = common::memory_store();
    let config = common::test_config();

    let first = db::init(store.clone(), &config).await.unwrap();
    let second = db::init(store.clone(), &config).await.unwrap();

    let admin = first.expect("admin criado na primeira vez");
    assert_eq!(admin.role, UserRole::Admin);
    assert!(second.is_none());
    assert_eq!(store.count(Collection::Users).await.unwrap(), 1);
}

#[tokio::test]
async fn cleanup_only_removes_old_read_notifications() {
    let store = common::sqlite_store().await;
    let repo = Repository::<Notification>::new(store.clone());
    let user = Uuid::new_v4();

    let old_read = notification(user, true, 40);
    let old_unread = notification(user, false, 40);
    let recent_read = notification(user, true, 2);
    for n in [&old_read, &old_unread, &recent_read] {
        repo.save(n).await.unwrap();
    }

    let deleted = admin::cleanup_database(store.clone(), Utc::now()).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(repo.find_by_id(old_read.id).await.unwrap().is_none());
    assert!(repo.find_by_id(old_unread.id).await.unwrap().is_some());
    assert!(repo.find_by_id(recent_read.id).await.unwrap().is_some());
}

#[tokio::test]
async fn stats_count_every_collection() {
    let store = common::memory_store();
    let state = common::state(store.clone());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    common::register(&state, "tenant@example.fr", UserRole::Tenant).await;
    common::create_property(&state, &owner, "T2").await;

    let stats = admin::get_stats(store).await.unwrap();

    assert_eq!(stats.counts.len(), Collection::ALL.len());
    assert_eq!(stats.counts["users"], 2);
    assert_eq!(stats.counts["properties"], 1);
    assert_eq!(stats.users_by_role["owner"], 1);
    assert_eq!(stats.properties_by_status["available"], 1);
    assert!(stats.to_string().contains("Notificações não lidas: 0"));
}

#[tokio::test]
async fn backup_writes_a_timestamped_file() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();

    for store in [common::memory_store(), common::sqlite_store().await] {
        let state = common::state(store.clone());
        common::register(&state, "owner@example.fr", UserRole::Owner).await;

        let path = admin::backup_database(store.clone(), dir.path(), now).await.unwrap();

        let expected = format!("izimo_backup_20260314_092653_000.{}", store.backup_extension());
        assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[tokio::test]
async fn backups_in_the_same_second_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
    let store = common::sqlite_store().await;

    let first = admin::backup_database(store.clone(), dir.path(), now).await.unwrap();
    let second = admin::backup_database(store, dir.path(), now + Duration::milliseconds(250))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

/// Delegates to a real store but refuses to read one collection.
struct FlakyStore {
    inner: Arc<dyn Store>,
    broken: Collection,
}

#[async_trait]
impl Store for FlakyStore {
    async fn get_all(&self, collection: Collection) -> Result<Vec<Record>, AppError> {
        if collection == self.broken {
            return Err(AppError::InvalidRecord("tabela corrompida".to_string()));
        }
        self.inner.get_all(collection).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>, AppError> {
        self.inner.get(collection, id).await
    }

    async fn put(&self, collection: Collection, record: Record) -> Result<(), AppError> {
        self.inner.put(collection, record).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError> {
        self.inner.delete(collection, id).await
    }

    async fn clear(&self, collection: Collection) -> Result<(), AppError> {
        self.inner.clear(collection).await
    }

    async fn get_by_index(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Record>, AppError> {
        self.inner.get_by_index(collection, field, value).await
    }

    async fn backup(&self, dest: &Path) -> Result<(), AppError> {
        self.inner.backup(dest).await
    }

    fn backup_extension(&self) -> &'static str {
        self.inner.backup_extension()
    }
}

#[tokio::test]
async fn export_skips_a_failing_table_and_keeps_going() {
    let inner = common::memory_store();
    let state = common::state(inner.clone());
    let (_, owner) = common::register(&state, "owner@example.fr", UserRole::Owner).await;
    common::create_property(&state, &owner, "T2").await;

    let store: Arc<dyn Store> = Arc::new(FlakyStore {
        inner,
        broken: Collection::Messages,
    });
    let dir = tempfile::tempdir().unwrap();

    let report = export::export_all(store, dir.path(), Utc::now()).await.unwrap();

    assert_eq!(report.failed, vec!["messages".to_string()]);
    assert_eq!(report.exported.len(), Collection::ALL.len() - 1);
    assert!(report.exported.contains(&("users".to_string(), 1)));
    assert!(report.exported.contains(&("properties".to_string(), 1)));
    assert!(report.path.exists());
    assert!(report.path.to_string_lossy().ends_with(".xlsx"));
}
