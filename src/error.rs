use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use thiserror::Error;

use crate::api::responses::ErrorDetail;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

/// Reasons a bearer-token check can reject a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Backend token not configured")]
    TokenNotConfigured,
    #[error("Authentication required")]
    MissingCredentials,
    #[error("Invalid token")]
    InvalidToken,
}

impl AuthError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::TokenNotConfigured => "token_not_configured",
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidToken => "invalid_token",
        }
    }
}

/// Failures while loading or reading the backing document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("balance record for account '{account_id}' has no numeric balance.available")]
    InvalidAmount { account_id: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Document(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            AppError::Document(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorDetail::new(detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::TokenNotConfigured.to_string(), "Backend token not configured");
        assert_eq!(AuthError::MissingCredentials.to_string(), "Authentication required");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::from(AuthError::InvalidToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("Balance not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let err = AppError::from(DocumentError::InvalidAmount {
            account_id: "acc_1".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_is_verbatim() {
        let err = AppError::NotFound("Transactions not found".into());
        assert_eq!(err.to_string(), "Transactions not found");
    }
}
