use crate::record::JobRecord;
use crate::store::{COUNTER_KEY, JobStore, StoreError};
use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Serialize, Deserialize)]
struct CounterRecord {
    next_id: u64,
}

/// Store backend that treats a directory as the job table: one JSON file per
/// record, plus the reserved counter file.
///
/// Records are created with `create_new`, so an existing item is never
/// overwritten. The counter read+write runs under an exclusive OS advisory
/// lock on a sidecar lock file, so handles in other processes sharing the
/// same directory serialize against it too. The new counter value goes
/// through a per-call unique temp file and a rename, so a crashed increment
/// never leaves a torn counter behind.
pub struct FilesystemStore {
    base_dir: PathBuf,
    counter_path: PathBuf,
    lock_path: PathBuf,
}

impl FilesystemStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        let counter_path = base_dir.join(format!("{COUNTER_KEY}.json"));
        let lock_path = base_dir.join(format!("{COUNTER_KEY}.lock"));
        Ok(FilesystemStore {
            base_dir,
            counter_path,
            lock_path,
        })
    }

    /// Load every job record in the table, counter excluded. Ordering is
    /// whatever the directory iteration yields.
    pub fn records(&self) -> Result<Vec<JobRecord>, StoreError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path == self.counter_path || path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            let file = File::open(&path)?;
            records.push(serde_json::from_reader(BufReader::new(file))?);
        }
        Ok(records)
    }

    /// Read, bump, and rewrite the counter while holding the file lock.
    ///
    /// The lock is on a sidecar file rather than the counter itself because
    /// the rename replaces the counter's inode on every increment. Each call
    /// opens its own descriptor, so the lock also serializes concurrent
    /// tasks within one process. It releases when `lock_file` closes, on
    /// every return path.
    fn increment_locked(
        base_dir: &Path,
        counter_path: &Path,
        lock_path: &Path,
    ) -> Result<u64, StoreError> {
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;
        lock_file.lock_exclusive()?;

        let next = Self::read_counter(counter_path)? + 1;

        let mut tmp = NamedTempFile::new_in(base_dir)?;
        serde_json::to_writer(&mut tmp, &CounterRecord { next_id: next })?;
        tmp.as_file().sync_all()?;
        tmp.persist(counter_path).map_err(|e| e.error)?;

        Ok(next)
    }

    fn read_counter(counter_path: &Path) -> Result<u64, StoreError> {
        match File::open(counter_path) {
            Ok(file) => {
                let counter: CounterRecord = serde_json::from_reader(BufReader::new(file))
                    .map_err(|e| StoreError::CorruptCounter(e.to_string()))?;
                Ok(counter.next_id)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn record_path(&self, record: &JobRecord) -> PathBuf {
        // Both halves of the composite key go into the file name.
        self.base_dir
            .join(format!("{}_{}.json", record.job_id, record.created_at))
    }
}

#[async_trait]
impl JobStore for FilesystemStore {
    async fn increment_counter(&self) -> Result<u64, StoreError> {
        let base_dir = self.base_dir.clone();
        let counter_path = self.counter_path.clone();
        let lock_path = self.lock_path.clone();

        // The lock acquisition can block on other processes, so keep it off
        // the async executor threads.
        tokio::task::spawn_blocking(move || {
            Self::increment_locked(&base_dir, &counter_path, &lock_path)
        })
        .await
        .map_err(|e| StoreError::Io(io::Error::other(e)))?
    }

    async fn put_record(&self, record: &JobRecord) -> Result<(), StoreError> {
        let path = self.record_path(record);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::Duplicate(record.job_id.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush()?;
        Ok(())
    }
}
