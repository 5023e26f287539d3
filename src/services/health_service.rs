use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::DocumentError;
use crate::repositories::DocumentRepository;

/// Aggregate figures reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub assets: f64,
}

/// Computes the dataset summary shown on `/api/healthz`.
pub struct HealthService {
    documents: Arc<dyn DocumentRepository>,
}

impl HealthService {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    /// Loads the document and sums every available balance.
    pub async fn summarize(&self) -> Result<AssetSummary, DocumentError> {
        let summary = self
            .documents
            .load()
            .await
            .and_then(|document| document.total_available())
            .map(|assets| AssetSummary { assets });

        if let Err(e) = &summary {
            warn!(error = %e, "health summary failed");
        }
        summary
    }
}
