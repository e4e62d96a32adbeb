// crates/core/src/store.rs
//! Create/read operations over job records.
//!
//! The store is the only code in this process that touches record files, but
//! the records directory is shared with the worker process, so every write
//! goes through a temp-file-and-rename so concurrent readers never observe a
//! partially written record.

use chrono::{SecondsFormat, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::job::{JobRecord, JobStatus};
use crate::storage::StorageLayout;

/// Handle over the job records under one storage root. Cheap to clone.
#[derive(Debug, Clone)]
pub struct JobStore {
    layout: StorageLayout,
}

impl JobStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Create a fresh `queued` record and persist it.
    ///
    /// The caller must not assume the job exists if this fails: the record is
    /// only visible once the rename completes.
    pub async fn create(
        &self,
        original_name: &str,
        target_height: Option<u32>,
    ) -> Result<JobRecord, StoreError> {
        self.layout.ensure().await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = JobRecord {
            input_path: StorageLayout::relative_upload_path(&id, original_name),
            output_path: StorageLayout::relative_output_path(&id),
            id,
            status: JobStatus::Queued,
            progress: 0.0,
            original_name: original_name.to_string(),
            target_height,
            error: None,
            created_at: now.clone(),
            updated_at: now,
        };

        self.write_record(&record).await?;
        Ok(record)
    }

    /// Load the record for `id`.
    ///
    /// An absent file, an unreadable file, and a file that fails to parse are
    /// all reported as `NotFound` — to callers the record does not exist.
    pub async fn read(&self, id: &str) -> Result<JobRecord, StoreError> {
        let path = self.layout.record_path(id);
        let raw = tokio::fs::read(&path).await.map_err(|e| {
            debug!(job_id = %id, path = %path.display(), error = %e, "record unreadable");
            StoreError::not_found(id)
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            debug!(job_id = %id, path = %path.display(), error = %e, "record unparseable");
            StoreError::not_found(id)
        })
    }

    /// Load the record whose file was most recently modified.
    ///
    /// Ordering uses the filesystem modification time, not the record's own
    /// timestamp fields — the worker rewrites records without necessarily
    /// bumping those. Ties break arbitrarily.
    pub async fn latest(&self) -> Result<JobRecord, StoreError> {
        let dir = self.layout.records_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Empty);
            }
            Err(e) => return Err(StoreError::io(&dir, e)),
        };

        let mut newest: Option<(std::time::SystemTime, String)> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .await
                .and_then(|m| m.modified())
                .map_err(|e| StoreError::io(&path, e))?;
            if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
                newest = Some((modified, id.to_string()));
            }
        }

        match newest {
            Some((_, id)) => self.read(&id).await,
            None => Err(StoreError::Empty),
        }
    }

    /// Serialize and atomically publish a record file.
    async fn write_record(&self, record: &JobRecord) -> Result<(), StoreError> {
        let path = self.layout.record_path(&record.id);
        let tmp = self
            .layout
            .records_dir()
            .join(format!(".{}.json.tmp", record.id));

        let json =
            serde_json::to_vec_pretty(record).map_err(|e| StoreError::io(&path, e.into()))?;
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!(job_id = %record.id, path = %path.display(), "job record written");
        Ok(())
    }
}
