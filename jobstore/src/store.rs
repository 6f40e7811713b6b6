use crate::record::JobRecord;
use async_trait::async_trait;
use std::io;

/// Reserved key for the counter sentinel record. It is used for both halves
/// of the composite `(job_id, created_at)` key, so it can never collide with
/// a numeric job id.
pub const COUNTER_KEY: &str = "COUNTER";

/// Errors surfaced by a store backend
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("record already exists: {0}")]
    Duplicate(String),

    #[error("counter record is corrupt: {0}")]
    CorruptCounter(String),
}

/// A key-value table of job records plus the reserved counter record.
///
/// Implementations must guarantee two properties:
/// - `increment_counter` is atomic with respect to concurrent callers; two
///   callers never observe the same post-increment value.
/// - `put_record` only ever inserts fresh items; an existing item is never
///   overwritten.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Add one to the counter and return the post-increment value.
    async fn increment_counter(&self) -> Result<u64, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if a record
    /// with the same key is already present.
    async fn put_record(&self, record: &JobRecord) -> Result<(), StoreError>;
}
