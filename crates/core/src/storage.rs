// crates/core/src/storage.rs
//! Storage layout under a single configurable root.
//!
//! Single source of truth for every path the pipeline touches — eliminates
//! ad-hoc joins scattered across the server and keeps the layout identical
//! to what the external worker expects:
//!
//! ```text
//! <root>/uploads/{id}-{sanitizedName}   uploaded inputs
//! <root>/outputs/{id}.mp4               produced artifacts
//! <root>/job-records/{id}.json          job record serializations
//! <root>/tmp/                           worker scratch space
//! ```

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Environment variable selecting the storage root. Shared with the worker.
pub const STORAGE_ROOT_ENV: &str = "STORAGE_ROOT";

/// Default storage root, relative to the working directory.
const DEFAULT_ROOT: &str = "storage";

/// Resolver for all filesystem locations under the storage root.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build the layout from `STORAGE_ROOT`, falling back to `./storage`.
    pub fn from_env() -> Self {
        let root = std::env::var(STORAGE_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_ROOT)
            });
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("outputs")
    }

    pub fn records_dir(&self) -> PathBuf {
        self.root.join("job-records")
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }

    /// Create the root and all four subdirectories. Idempotent; only
    /// underlying filesystem errors propagate.
    pub async fn ensure(&self) -> Result<(), StoreError> {
        for dir in [
            self.root.clone(),
            self.uploads_dir(),
            self.outputs_dir(),
            self.records_dir(),
            self.tmp_dir(),
        ] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| StoreError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Absolute path of the record file for `id`.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.records_dir().join(format!("{id}.json"))
    }

    /// Storage-relative path reserved for the produced artifact. Fixed mp4
    /// container; derivable from `id` alone.
    pub fn relative_output_path(id: &str) -> String {
        format!("outputs/{id}.mp4")
    }

    /// Storage-relative path for an uploaded input. The unique `id` prefix
    /// keeps paths distinct even when different names sanitize identically.
    pub fn relative_upload_path(id: &str, original_name: &str) -> String {
        format!("uploads/{id}-{}", sanitize_file_name(original_name))
    }

    /// Join a storage-relative path onto the root for actual file IO.
    ///
    /// Record paths come from files any process can write, so they are
    /// untrusted input: absolute paths, backslashes, and `..` segments are
    /// rejected before joining.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, StoreError> {
        let escapes = relative.is_empty()
            || relative.starts_with('/')
            || relative.contains('\\')
            || relative.split('/').any(|segment| segment == "..");
        if escapes {
            return Err(StoreError::Traversal {
                path: relative.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Keeps user-supplied file names safe as path fragments; collisions are
/// acceptable because callers prepend the unique job id.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_passes_safe_names() {
        assert_eq!(sanitize_file_name("clip_01.final-v2.mp4"), "clip_01.final-v2.mp4");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my clip (1).mp4"), "my_clip__1_.mp4");
        assert_eq!(sanitize_file_name("vidéo.mp4"), "vid_o.mp4");
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        let safe = sanitize_file_name("../../etc/passwd.mp4");
        assert!(!safe.contains('/'));
        assert_eq!(safe, ".._.._etc_passwd.mp4");
    }

    #[test]
    fn test_relative_paths_are_deterministic() {
        let a = StorageLayout::relative_output_path("abc");
        let b = StorageLayout::relative_output_path("abc");
        assert_eq!(a, b);
        assert_eq!(a, "outputs/abc.mp4");

        assert_eq!(
            StorageLayout::relative_upload_path("abc", "clip.mp4"),
            "uploads/abc-clip.mp4"
        );
    }

    #[test]
    fn test_upload_paths_distinct_for_colliding_names() {
        let a = StorageLayout::relative_upload_path("id-a", "a b.mp4");
        let b = StorageLayout::relative_upload_path("id-b", "a?b.mp4");
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_path() {
        let layout = StorageLayout::new("/srv/storage");
        assert_eq!(
            layout.record_path("abc"),
            PathBuf::from("/srv/storage/job-records/abc.json")
        );
    }

    #[test]
    fn test_resolve_joins_under_root() {
        let layout = StorageLayout::new("/srv/storage");
        let path = layout.resolve("outputs/abc.mp4").unwrap();
        assert_eq!(path, PathBuf::from("/srv/storage/outputs/abc.mp4"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let layout = StorageLayout::new("/srv/storage");
        assert!(matches!(
            layout.resolve("../outside.mp4"),
            Err(StoreError::Traversal { .. })
        ));
        assert!(matches!(
            layout.resolve("uploads/../../etc/passwd"),
            Err(StoreError::Traversal { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_absolute_and_backslash() {
        let layout = StorageLayout::new("/srv/storage");
        assert!(layout.resolve("/etc/passwd").is_err());
        assert!(layout.resolve("uploads\\..\\x").is_err());
        assert!(layout.resolve("").is_err());
    }

    #[tokio::test]
    async fn test_ensure_creates_layout_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().join("storage"));

        layout.ensure().await.unwrap();
        assert!(layout.uploads_dir().is_dir());
        assert!(layout.outputs_dir().is_dir());
        assert!(layout.records_dir().is_dir());
        assert!(layout.tmp_dir().is_dir());

        // Second run must be a no-op, not an error.
        layout.ensure().await.unwrap();
    }
}
