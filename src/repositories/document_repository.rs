use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::DocumentError;
use crate::models::Document;
use crate::observability::{get_metrics, LatencyTimer};

/// Source of the dataset document.
///
/// Implementations must return a fresh document on every call; callers never
/// hold on to one across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn load(&self) -> Result<Document, DocumentError>;
}

/// Reads the document from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct FileDocumentRepository {
    path: PathBuf,
}

impl FileDocumentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_and_parse(&self) -> Result<Document, DocumentError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DocumentError::Read {
                path: self.path.clone(),
                source,
            })?;

        Document::from_slice(&bytes).map_err(|source| DocumentError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl DocumentRepository for FileDocumentRepository {
    async fn load(&self) -> Result<Document, DocumentError> {
        let timer = LatencyTimer::new();
        let result = self.read_and_parse().await;

        get_metrics().record_document_load(timer.elapsed_ms(), result.is_ok());
        debug!(
            path = %self.path.display(),
            success = result.is_ok(),
            "document loaded"
        );

        result
    }
}
