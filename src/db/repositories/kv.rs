use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

use crate::entities::{kv_entries, prelude::*};

pub struct KvRepository {
    conn: DatabaseConnection,
}

impl KvRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntries::find_by_id(key.to_string())
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to read key '{key}'"))?;

        Ok(entry.map(|e| e.value))
    }

    /// Insert or overwrite the value stored under `key`.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        upsert(&self.conn, key, value).await
    }

    /// Writes every entry in one transaction; either all land or none do.
    pub async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to start write transaction")?;

        for (key, value) in entries {
            upsert(&txn, key, value).await?;
        }

        txn.commit().await.context("Failed to commit write transaction")?;
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        let entries = KvEntries::find()
            .all(&self.conn)
            .await
            .context("Failed to list stored keys")?;

        Ok(entries.into_iter().map(|e| e.key).collect())
    }
}

async fn upsert<C: ConnectionTrait>(db: &C, key: &str, value: &str) -> Result<()> {
    let active = kv_entries::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
    };

    KvEntries::insert(active)
        .on_conflict(
            OnConflict::column(kv_entries::Column::Key)
                .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .with_context(|| format!("Failed to write key '{key}'"))?;

    Ok(())
}
