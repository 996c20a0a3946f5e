//! External collaborator seams.
//!
//! The core consumes these interfaces; deployments supply real backends.
//! The reference implementations here are enough to run the server and
//! the test suite: a local-directory asset store and an in-memory
//! submission sink.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable URL for an uploaded asset; block configs store it as an
/// opaque string.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssetUrl {
    pub url: String,
}

pub trait AssetStore: Send + Sync {
    fn store(&self, filename: &str, bytes: &[u8]) -> Result<AssetUrl, AssetError>;
}

/// Asset store writing into a local directory, served back under
/// `/assets/`.
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for LocalAssetStore {
    fn store(&self, filename: &str, bytes: &[u8]) -> Result<AssetUrl, AssetError> {
        // Only bare filenames: anything path-like could escape the root.
        let valid = !filename.is_empty()
            && !filename.contains('/')
            && !filename.contains('\\')
            && !filename.starts_with('.');
        if !valid {
            return Err(AssetError::InvalidFilename(filename.to_string()));
        }

        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.root.join(filename), bytes)?;
        info!(filename, size = bytes.len(), "asset stored");

        Ok(AssetUrl {
            url: format!("/assets/{filename}"),
        })
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionReceipt {
    pub id: String,
}

/// Sink for form-block submissions. The block persists nothing itself;
/// whatever arrives from the public surface lands here.
pub trait FormSink: Send + Sync {
    fn submit(
        &self,
        page_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<SubmissionReceipt, SubmitError>;
}

#[derive(Debug)]
pub struct StoredSubmission {
    pub id: String,
    pub page_id: String,
    pub fields: Map<String, Value>,
}

/// In-memory sink, used by the dev server and tests.
#[derive(Default)]
pub struct MemoryFormSink {
    submissions: Mutex<Vec<StoredSubmission>>,
}

impl MemoryFormSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, page_id: &str) -> usize {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.page_id == page_id)
            .count()
    }
}

impl FormSink for MemoryFormSink {
    fn submit(
        &self,
        page_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if fields.is_empty() {
            return Err(SubmitError::Rejected("empty submission".to_string()));
        }

        let mut submissions = self.submissions.lock().unwrap();
        let id = format!("submission-{}", submissions.len() + 1);
        submissions.push(StoredSubmission {
            id: id.clone(),
            page_id: page_id.to_string(),
            fields: fields.clone(),
        });
        Ok(SubmissionReceipt { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_asset_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        let url = store.store("logo.svg", b"<svg/>").unwrap();
        assert_eq!(url.url, "/assets/logo.svg");
        assert_eq!(std::fs::read(dir.path().join("logo.svg")).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_pathlike_filenames_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        for bad in ["../escape.txt", "a/b.png", ".hidden", ""] {
            assert!(matches!(
                store.store(bad, b"x"),
                Err(AssetError::InvalidFilename(_))
            ));
        }
    }

    #[test]
    fn test_memory_sink_records_per_page() {
        let sink = MemoryFormSink::new();
        let mut fields = Map::new();
        fields.insert("email".to_string(), json!("a@example.com"));

        let receipt = sink.submit("page-1", &fields).unwrap();
        assert_eq!(receipt.id, "submission-1");
        sink.submit("page-2", &fields).unwrap();

        assert_eq!(sink.count_for("page-1"), 1);
        assert_eq!(sink.count_for("page-2"), 1);
    }

    #[test]
    fn test_empty_submission_rejected() {
        let sink = MemoryFormSink::new();
        assert!(sink.submit("page-1", &Map::new()).is_err());
    }
}
