use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{CallRepository, GroupCount, RepositoryError};
use crate::domain::CallRecord;

/// In-memory stand-in for the external document store. Keeps insertion
/// order; aggregation mirrors the store's group-by queries.
#[derive(Default)]
pub struct InMemoryCallRepository {
    records: RwLock<Vec<CallRecord>>,
}

impl InMemoryCallRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallRepository for InMemoryCallRepository {
    async fn insert(&self, record: &CallRecord) -> Result<Uuid, RepositoryError> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record.id)
    }

    async fn list(&self) -> Result<Vec<CallRecord>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn count_by_call_type(&self) -> Result<Vec<GroupCount>, RepositoryError> {
        let records = self.records.read().await;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for record in records.iter().filter(|r| !r.call_type.is_empty()) {
            *counts.entry(record.call_type.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect())
    }

    async fn count_by_date(&self) -> Result<Vec<GroupCount>, RepositoryError> {
        let records = self.records.read().await;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for record in records.iter() {
            let day = record.created_at.format("%Y-%m-%d").to_string();
            *counts.entry(day).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect())
    }
}
