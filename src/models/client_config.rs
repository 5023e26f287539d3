use serde::{Deserialize, Serialize};

use crate::config::FeatureFlags;

pub const API_BASE_URL: &str = "/api";

/// How the frontend should source its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    Static,
    Disabled,
    Live,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Static => "static",
            BackendMode::Disabled => "disabled",
            BackendMode::Live => "live",
        }
    }
}

/// Feature flags exposed to the client before the mode is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseConfig {
    #[serde(rename = "apiBaseUrl")]
    pub api_base_url: String,
    #[serde(rename = "FEATURE_USE_BACKEND")]
    pub feature_use_backend: bool,
    #[serde(rename = "FEATURE_MANUAL_DATA")]
    pub feature_manual_data: bool,
    #[serde(rename = "FEATURE_STATIC_DB")]
    pub feature_static_db: bool,
}

impl From<&FeatureFlags> for BaseConfig {
    fn from(flags: &FeatureFlags) -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            feature_use_backend: flags.use_backend,
            feature_manual_data: flags.manual_data,
            feature_static_db: flags.static_db,
        }
    }
}

/// Body of `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    #[serde(rename = "backendMode")]
    pub backend_mode: BackendMode,
}

impl ClientConfig {
    pub fn new(base: BaseConfig) -> Self {
        let backend_mode = compute_backend_mode(&base);
        Self { base, backend_mode }
    }
}

/// Static data wins over everything, then a disabled backend, otherwise live.
pub fn compute_backend_mode(config: &BaseConfig) -> BackendMode {
    if config.feature_static_db {
        BackendMode::Static
    } else if !config.feature_use_backend {
        BackendMode::Disabled
    } else {
        BackendMode::Live
    }
}
