use crate::record::{JobRecord, RelayResult};
use crate::store::{JobStore, StoreError};

/// Allocate the next sequential job id and journal the relay result under it.
///
/// The id comes from a single atomic increment-and-fetch on the counter
/// record, never a read-modify-write pair, so concurrent allocations cannot
/// return the same value. The increment and the subsequent insert are not
/// transactional with each other: a failure between them leaves the counter
/// advanced with no record, an accepted gap in the sequence (uniqueness is
/// preserved either way).
pub async fn allocate_and_store(
    store: &dyn JobStore,
    result: &RelayResult,
) -> Result<String, StoreError> {
    let id = store.increment_counter().await?;
    let record = JobRecord::new(id, result.body.clone());
    store.put_record(&record).await?;
    tracing::debug!(job_id = %record.job_id, "journaled relay result");
    Ok(record.job_id)
}
