use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of one relay cycle: the sink's HTTP status and its parsed
/// response body. Constructed once per successful POST, then handed to the
/// allocator for journaling.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayResult {
    pub status: u16,
    pub body: Value,
}

/// A persisted unit of work outcome. Written once, never mutated or deleted.
///
/// `result` is the opaque JSON payload returned by the sink; nothing in this
/// crate interprets it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub job_id: String,
    pub created_at: String,
    pub result: Value,
}

impl JobRecord {
    /// Build a record for a freshly allocated id, timestamped now.
    pub fn new(id: u64, result: Value) -> Self {
        JobRecord {
            job_id: id.to_string(),
            // ISO-8601, UTC, microsecond precision
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            result,
        }
    }
}
