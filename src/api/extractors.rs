use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use http::header::AUTHORIZATION;
use tracing::warn;

use crate::error::AppError;
use crate::observability::get_metrics;
use crate::services::AuthService;

use super::routes::AppState;

/// Bearer-token gate for dataset routes.
///
/// Handlers take this after their other extractors, so a malformed query is
/// reported before credentials are checked.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        // A header that is not valid UTF-8 is treated as absent.
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if let Err(e) = AuthService::new(&state.settings.auth).authorize(authorization) {
            warn!(
                path = %parts.uri.path(),
                reason = e.reason(),
                "request rejected by auth gate"
            );
            get_metrics().record_auth_rejection(e.reason());
            return Err(e.into());
        }

        Ok(RequireAuth)
    }
}
