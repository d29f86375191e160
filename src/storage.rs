use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::Context;
use axum::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Fixed names of the four persisted blobs. The keys match what the
/// original localStorage layout used, so an exported dump loads unchanged.
pub mod keys {
    pub const FOOD_POOL: &str = "foodPool";
    pub const ACTIVITY_POOL: &str = "activityPool";
    pub const DAILY_RECORDS: &str = "dailyRecords";
    pub const CHART_SLOTS: &str = "chartSlots";
}

/// The persistence port: whole-collection JSON snapshots behind fixed keys.
/// Writes are last-write-wins; there is exactly one logical writer.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn save(&self, key: &str, data: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::from_str(database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true);
        // One connection: SQLite allows a single writer anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .context("connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("run migrations")?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl BlobStore for SqliteStore {
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let data = sqlx::query_scalar::<_, String>("SELECT data FROM blobs WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("load blob {key}"))?;
        Ok(data)
    }

    async fn save(&self, key: &str, data: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blobs (key, data, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE
            SET data = excluded.data, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(data)
        .execute(&self.pool)
        .await
        .with_context(|| format!("save blob {key}"))?;
        Ok(())
    }
}

/// In-memory store for tests and `AppState::fake()`.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_blob(key: &str, data: &str) -> Self {
        let store = Self::default();
        store
            .blobs
            .lock()
            .expect("memory store lock")
            .insert(key.to_string(), data.to_string());
        store
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.blobs.lock().expect("memory store lock").get(key).cloned())
    }

    async fn save(&self, key: &str, data: &str) -> anyhow::Result<()> {
        self.blobs
            .lock()
            .expect("memory store lock")
            .insert(key.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrips_blobs() {
        let store = MemoryStore::default();
        assert!(store.load(keys::FOOD_POOL).await.unwrap().is_none());

        store.save(keys::FOOD_POOL, "[]").await.unwrap();
        assert_eq!(store.load(keys::FOOD_POOL).await.unwrap().as_deref(), Some("[]"));

        // Overwriting with identical content is a plain last-write-wins no-op.
        store.save(keys::FOOD_POOL, "[]").await.unwrap();
        assert_eq!(store.load(keys::FOOD_POOL).await.unwrap().as_deref(), Some("[]"));
    }
}
