// crates/core/src/job.rs
//! The persisted job record and its serialization contract.
//!
//! Records are written as camelCase JSON so the external worker (and any
//! pre-existing records on disk) keep working unchanged. Every field written
//! must be the field read back: `progress` stays numeric, optional fields are
//! omitted rather than serialized as null.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one upscale job.
///
/// The core only ever writes `Queued`; all other transitions are performed by
/// the external worker directly on disk. No transition table is enforced —
/// last writer wins on every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

/// Snapshot of one upscale request: identity, status, and file locations.
///
/// `input_path` and `output_path` are storage-relative (never absolute);
/// `output_path` is reserved at creation time, before the file exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub status: JobStatus,
    /// 0–100 percent, by convention only — the core neither validates nor
    /// clamps what the worker writes.
    pub progress: f64,
    pub input_path: String,
    pub output_path: String,
    pub original_name: String,
    /// Requested output height, forwarded to the worker. Floor of 1080 is
    /// applied at intake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_height: Option<u32>,
    /// Human-readable failure message; meaningful only when `status` is
    /// `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
