// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the job store and storage layout.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Job record not found: {id}")]
    NotFound { id: String },

    #[error("No job records exist")]
    Empty,

    #[error("Path escapes the storage root: {path}")]
    Traversal { path: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("abc123");
        assert!(err.to_string().contains("abc123"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::io("/srv/storage/job-records", io_err);
        assert!(err.to_string().contains("/srv/storage/job-records"));
    }

    #[test]
    fn test_traversal_display() {
        let err = StoreError::Traversal {
            path: "../outside".to_string(),
        };
        assert!(err.to_string().contains("escapes"));
    }
}
