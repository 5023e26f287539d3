use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::AccountRecord;
use crate::services::AssetSummary;

/// Error body used by every non-health error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Successful `/api/healthz` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub backend_url: String,
    pub manual_data: ManualDataStatus,
}

impl HealthResponse {
    pub fn new(settings: &Settings, summary: AssetSummary) -> Self {
        Self {
            ok: true,
            backend_url: settings.server.external_url.clone(),
            manual_data: ManualDataStatus {
                enabled: settings.features.manual_data,
                readonly: false,
                dry_run: false,
                connected: None,
                summary,
            },
        }
    }
}

/// Manual-data block of the health response. `connected` is always null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualDataStatus {
    pub enabled: bool,
    pub readonly: bool,
    pub dry_run: bool,
    pub connected: Option<bool>,
    pub summary: AssetSummary,
}

/// Failed `/api/healthz` body, sent with a 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl HealthErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountRecord>,
}
