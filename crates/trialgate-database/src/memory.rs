//! In-memory hosting history.
//!
//! Backs tests and offline evaluation from a JSON export of the service
//! table. Answers queries with the same matching rules as the SQL
//! repository.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use trialgate_core::result::AppResult;
use trialgate_core::traits::HostingHistory;
use trialgate_core::types::lookup::HistoryQuery;
use trialgate_entity::hosting::HostingRecord;

/// Hosting history held in process memory.
#[derive(Debug, Default)]
pub struct MemoryHostingHistory {
    records: RwLock<Vec<HostingRecord>>,
    queries: AtomicUsize,
}

impl MemoryHostingHistory {
    /// Create a store holding `records`.
    pub fn new(records: Vec<HostingRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            queries: AtomicUsize::new(0),
        }
    }

    /// Load records from a JSON array file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let records: Vec<HostingRecord> = serde_json::from_str(&raw)?;
        debug!(
            path = %path.as_ref().display(),
            records = records.len(),
            "Loaded hosting history fixture"
        );
        Ok(Self::new(records))
    }

    /// Add a record.
    pub async fn insert(&self, record: HostingRecord) {
        self.records.write().await.push(record);
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Number of existence queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostingHistory for MemoryHostingHistory {
    async fn exists(&self, query: &HistoryQuery) -> AppResult<bool> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let records = self.records.read().await;
        Ok(records.iter().any(|record| record.matches(query)))
    }
}
