use crate::record::JobRecord;
use crate::store::{JobStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store backend: a mutex-guarded map plus counter.
///
/// Primarily a test double, but also usable for local runs where durability
/// does not matter. The lock is never held across an await point.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: HashMap<(String, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of job records held, counter excluded.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a record's payload by job id, regardless of its timestamp.
    pub fn get(&self, job_id: &str) -> Option<Value> {
        let inner = self.lock();
        inner
            .records
            .iter()
            .find(|((id, _), _)| id == job_id)
            .map(|(_, result)| result.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another caller panicked mid-update;
        // the map and counter are still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn increment_counter(&self) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        Ok(inner.next_id)
    }

    async fn put_record(&self, record: &JobRecord) -> Result<(), StoreError> {
        let key = (record.job_id.clone(), record.created_at.clone());
        let mut inner = self.lock();
        if inner.records.contains_key(&key) {
            return Err(StoreError::Duplicate(record.job_id.clone()));
        }
        inner.records.insert(key, record.result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn counter_starts_at_one() {
        let store = MemoryStore::new();
        assert_eq!(store.increment_counter().await.unwrap(), 1);
        assert_eq!(store.increment_counter().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn put_never_overwrites() {
        let store = MemoryStore::new();
        let record = JobRecord {
            job_id: "1".into(),
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            result: json!({"a": 1}),
        };

        store.put_record(&record).await.unwrap();
        let duplicate = store.put_record(&record).await;
        assert!(matches!(duplicate, Err(StoreError::Duplicate(_))));

        // The original payload is untouched.
        assert_eq!(store.get("1"), Some(json!({"a": 1})));
        assert_eq!(store.len(), 1);
    }
}
