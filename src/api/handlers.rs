use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::extractors::RequireAuth;
use crate::api::requests::TransactionsQuery;
use crate::api::responses::{AccountsResponse, HealthErrorResponse, HealthResponse};
use crate::error::Result;
use crate::models::{BalanceRecord, BaseConfig, ClientConfig, TransactionGroup};
use crate::services::{AccountService, HealthService};

use super::routes::AppState;

/// Health check with a dataset summary.
///
/// Load failures are reported in the body rather than through [`AppError`](crate::error::AppError).
pub async fn healthz(State(state): State<AppState>) -> Response {
    let health_service = HealthService::new(state.documents.clone());

    match health_service.summarize().await {
        Ok(summary) => Json(HealthResponse::new(&state.settings, summary)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthErrorResponse::new(e.to_string())),
        )
            .into_response(),
    }
}

/// Client bootstrap configuration.
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig::new(BaseConfig::from(&state.settings.features)))
}

// ============================================================================
// Dataset Handlers
// ============================================================================

pub async fn list_accounts(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<AccountsResponse>> {
    let account_service = AccountService::new(state.documents.clone());
    let accounts = account_service.list_accounts().await?;
    Ok(Json(AccountsResponse { accounts }))
}

pub async fn get_account_balances(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    _auth: RequireAuth,
) -> Result<Json<BalanceRecord>> {
    let account_service = AccountService::new(state.documents.clone());
    let balance = account_service.get_balance(&account_id).await?;
    Ok(Json(balance))
}

pub async fn get_account_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    query: TransactionsQuery,
    _auth: RequireAuth,
) -> Result<Json<TransactionGroup>> {
    let account_service = AccountService::new(state.documents.clone());
    let group = account_service.get_transactions(&account_id, query.limit).await?;
    Ok(Json(group))
}
