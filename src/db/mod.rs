//! Persistent key-value storage.
//!
//! The domain store only needs `get(key)` and `set(key, value)` over JSON
//! documents, plus `set_many` when one operation touches both collections. `Store` keeps them in SQLite through sea-orm; `MemoryStore`
//! keeps them in process for tests and throwaway sessions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub mod migrator;
pub mod repositories;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Writes several keys as one unit. Implementations must leave every key
    /// untouched when any write fails.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;
}

/// Reads `key` as JSON, falling back to `default` when the key was never
/// written.
pub async fn get_json_or<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    default: T,
) -> Result<T> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Stored value under '{key}' is not valid JSON")),
        None => Ok(default),
    }
}

/// Serializes `value` for a later [`KeyValueStore::set_many`].
pub fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("Failed to serialize value for '{key}'"))
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn kv_repo(&self) -> repositories::kv::KvRepository {
        repositories::kv::KvRepository::new(self.conn.clone())
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        self.kv_repo().keys().await
    }
}

#[async_trait]
impl KeyValueStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.kv_repo().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, bytes = value.len(), "Persisting key");
        self.kv_repo().set(key, value).await
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        debug!(keys = entries.len(), "Persisting keys in one transaction");
        self.kv_repo().set_many(entries).await
    }
}

/// In-process store; contents vanish with the value.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_json_or_returns_default_for_missing_key() {
        let store = MemoryStore::new();
        let value: Vec<String> = get_json_or(&store, "missing", Vec::new()).await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn to_json_then_get_json_or_reads_back() {
        let store = MemoryStore::new();
        let raw = to_json("numbers", &vec![1, 2, 3]).unwrap();
        store.set("numbers", &raw).await.unwrap();

        let value: Vec<i32> = get_json_or(&store, "numbers", Vec::new()).await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_json_or_reports_corrupt_values() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").await.unwrap();

        let result: Result<Vec<i32>> = get_json_or(&store, "broken", Vec::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn set_many_writes_every_entry() {
        let store = MemoryStore::new();
        store
            .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
