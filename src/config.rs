use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_PATH: &str = "data/db.json";
pub const DEFAULT_EXTERNAL_URL: &str = "self";

/// Flat view of the configuration sources. Every value is read as a string so
/// that flag parsing stays under our control rather than the loader's.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    feature_static_db: Option<String>,
    feature_manual_data: Option<String>,
    backend_api_token: Option<String>,
    require_auth: Option<String>,
    render_external_url: Option<String>,
    host: Option<String>,
    port: Option<String>,
    data_path: Option<String>,
    log_level: Option<String>,
    log_format: Option<String>,
    metrics_port: Option<String>,
}

/// Immutable settings resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub features: FeatureFlags,
    pub auth: AuthSettings,
    pub server: ServerSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub static_db: bool,
    pub manual_data: bool,
    /// Always on for this service; kept as a flag so the client config can report it.
    pub use_backend: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            static_db: false,
            manual_data: false,
            use_backend: true,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthSettings {
    pub token: Option<String>,
    pub require_auth: bool,
}

impl AuthSettings {
    /// Resolves the auth policy from the raw token and the optional `REQUIRE_AUTH` override.
    ///
    /// The token is whitespace-trimmed and an empty token counts as unset. An
    /// empty override falls back to "required iff a token is configured".
    pub fn resolve(token: Option<&str>, require_auth: Option<&str>) -> Self {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let require_auth = match require_auth.filter(|v| !v.is_empty()) {
            Some(value) => parse_flag(Some(value)),
            None => token.is_some(),
        };

        Self { token, require_auth }
    }

    pub fn token_configured(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("require_auth", &self.require_auth)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Reported verbatim as `backendUrl` by the health endpoint.
    pub external_url: String,
    pub metrics_port: Option<u16>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            external_url: DEFAULT_EXTERNAL_URL.to_string(),
            metrics_port: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSettings {
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `config/default` (optional) and the process environment.
    pub fn new() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(config)
    }

    /// Resolves settings from an already-built configuration.
    pub fn from_config(config: config::Config) -> Result<Self> {
        let raw: RawSettings = config.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let features = FeatureFlags {
            static_db: parse_flag(raw.feature_static_db.as_deref()),
            manual_data: parse_flag(raw.feature_manual_data.as_deref()),
            use_backend: true,
        };

        let auth = AuthSettings::resolve(
            raw.backend_api_token.as_deref(),
            raw.require_auth.as_deref(),
        );

        let port = match non_empty(raw.port) {
            Some(value) => parse_port("PORT", &value)?,
            None => DEFAULT_PORT,
        };
        let metrics_port = non_empty(raw.metrics_port)
            .map(|value| parse_port("METRICS_PORT", &value))
            .transpose()?;

        let server = ServerSettings {
            host: non_empty(raw.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            external_url: raw
                .render_external_url
                .unwrap_or_else(|| DEFAULT_EXTERNAL_URL.to_string()),
            metrics_port,
        };

        let data = DataSettings {
            path: non_empty(raw.data_path)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        };

        let defaults = LoggingSettings::default();
        let logging = LoggingSettings {
            level: non_empty(raw.log_level).unwrap_or(defaults.level),
            format: non_empty(raw.log_format).unwrap_or(defaults.format),
        };

        Ok(Self {
            features,
            auth,
            server,
            data,
            logging,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// A flag is on only when its value is `true`, case-insensitively.
pub fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_port(name: &str, value: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|e| {
        AppError::Config(config::ConfigError::Message(format!(
            "{} must be a valid port number, got '{}': {}",
            name, value, e
        )))
    })
}
