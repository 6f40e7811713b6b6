//! Durable job journal: relay outcomes stored in a key-value table under
//! sequentially allocated job ids.
//!
//! The table holds ordinary job records plus one reserved counter record.
//! The counter is the only piece of cross-invocation shared state in the
//! system; everything here exists to make its increment atomic and its
//! records insert-only.

pub mod allocator;
pub mod filesystem;
pub mod memory;
pub mod record;
pub mod store;

pub use allocator::allocate_and_store;
pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;
pub use record::{JobRecord, RelayResult};
pub use store::{COUNTER_KEY, JobStore, StoreError};
