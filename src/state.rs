use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::{defaults, ActivityCard, ChartConfig, DailyData, FoodCard};
use crate::storage::{keys, BlobStore, MemoryStore, SqliteStore};

/// The four top-level collections. Owned by `AppState`, persisted as
/// whole-collection snapshots after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    pub food_pool: Vec<FoodCard>,
    pub activity_pool: Vec<ActivityCard>,
    pub daily_records: Vec<DailyData>,
    pub chart_slots: Vec<ChartConfig>,
}

impl Tracker {
    /// Built-in defaults, used on first run.
    pub fn first_run() -> Self {
        Self {
            food_pool: defaults::seed_food_cards(),
            activity_pool: defaults::seed_activity_cards(),
            daily_records: Vec::new(),
            chart_slots: defaults::default_chart_slots(),
        }
    }

    /// Load the four blobs. A missing or malformed blob falls back to its
    /// built-in default (first-run semantics); an I/O failure propagates.
    pub async fn load(store: &dyn BlobStore) -> anyhow::Result<Self> {
        let food_pool = load_collection(store, keys::FOOD_POOL, defaults::seed_food_cards).await?;
        let activity_pool =
            load_collection(store, keys::ACTIVITY_POOL, defaults::seed_activity_cards).await?;
        let daily_records = load_collection(store, keys::DAILY_RECORDS, Vec::new).await?;
        let chart_slots =
            load_collection(store, keys::CHART_SLOTS, defaults::default_chart_slots).await?;
        Ok(Self {
            food_pool,
            activity_pool,
            daily_records,
            chart_slots,
        })
    }

    /// Serialize every collection under its blob key.
    pub fn snapshot(&self) -> anyhow::Result<Vec<(&'static str, String)>> {
        Ok(vec![
            (keys::FOOD_POOL, serde_json::to_string(&self.food_pool)?),
            (keys::ACTIVITY_POOL, serde_json::to_string(&self.activity_pool)?),
            (keys::DAILY_RECORDS, serde_json::to_string(&self.daily_records)?),
            (keys::CHART_SLOTS, serde_json::to_string(&self.chart_slots)?),
        ])
    }
}

async fn load_collection<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
    fallback: impl FnOnce() -> Vec<T>,
) -> anyhow::Result<Vec<T>> {
    match store.load(key).await? {
        Some(json) => match serde_json::from_str(&json) {
            Ok(collection) => Ok(collection),
            Err(err) => {
                warn!(key, error = %err, "stored blob malformed, using defaults");
                Ok(fallback())
            }
        },
        None => Ok(fallback()),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn BlobStore>,
    pub tracker: Arc<RwLock<Tracker>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store =
            Arc::new(SqliteStore::connect(&config.database_url).await?) as Arc<dyn BlobStore>;
        Self::with_store(config, store).await
    }

    pub async fn with_store(
        config: Arc<AppConfig>,
        store: Arc<dyn BlobStore>,
    ) -> anyhow::Result<Self> {
        let tracker = Tracker::load(store.as_ref()).await?;
        Ok(Self {
            config,
            store,
            tracker: Arc::new(RwLock::new(tracker)),
        })
    }

    /// Write a snapshot produced by `Tracker::snapshot`. Called after each
    /// successful mutation; a failing write surfaces to the caller.
    pub async fn persist(&self, snapshot: Vec<(&'static str, String)>) -> anyhow::Result<()> {
        for (key, json) in snapshot {
            self.store.save(key, &json).await?;
        }
        Ok(())
    }

    /// State over an empty in-memory store, seeded with the built-in pools.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            daily_calorie_goal: 2200,
        });
        Self {
            config,
            store: Arc::new(MemoryStore::default()),
            tracker: Arc::new(RwLock::new(Tracker::first_run())),
        }
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_loads_first_run_defaults() {
        let store = MemoryStore::default();
        let tracker = Tracker::load(&store).await.unwrap();
        assert_eq!(tracker, Tracker::first_run());
        assert!(tracker.daily_records.is_empty());
    }

    #[tokio::test]
    async fn malformed_blob_falls_back_to_defaults() {
        let store = MemoryStore::with_blob(keys::FOOD_POOL, "{not json");
        let tracker = Tracker::load(&store).await.unwrap();
        assert_eq!(tracker.food_pool, defaults::seed_food_cards());
    }

    #[tokio::test]
    async fn snapshot_persists_and_reloads() {
        let mut tracker = Tracker::first_run();
        tracker.chart_slots.remove(0);

        let state = AppState {
            config: AppState::fake().config,
            store: Arc::new(MemoryStore::default()),
            tracker: Arc::new(RwLock::new(tracker.clone())),
        };
        state.persist(tracker.snapshot().unwrap()).await.unwrap();
        let reloaded = Tracker::load(state.store.as_ref()).await.unwrap();
        assert_eq!(reloaded, tracker);
    }
}
