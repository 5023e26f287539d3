use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::request_logging_middleware;
use crate::config::Settings;
use crate::repositories::{DocumentRepository, FileDocumentRepository};

/// Application state shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub documents: Arc<dyn DocumentRepository>,
}

impl AppState {
    pub fn new(settings: Settings, documents: Arc<dyn DocumentRepository>) -> Self {
        Self {
            settings: Arc::new(settings),
            documents,
        }
    }

    /// State backed by the JSON file named in the settings.
    pub fn from_settings(settings: Settings) -> Self {
        let documents = Arc::new(FileDocumentRepository::new(settings.data.path.clone()));
        Self::new(settings, documents)
    }
}

/// Creates the API router with all routes.
///
/// Dataset handlers are gated by the [`RequireAuth`](super::extractors::RequireAuth) extractor.
pub fn create_router(state: AppState) -> Router {
    let dataset = Router::new()
        .route("/accounts", get(handlers::list_accounts))
        .route("/accounts/:account_id/balances", get(handlers::get_account_balances))
        .route(
            "/accounts/:account_id/transactions",
            get(handlers::get_account_transactions),
        );

    Router::new()
        .route("/api/healthz", get(handlers::healthz))
        .route("/api/config", get(handlers::client_config))
        .nest("/api/db", dataset)
        .with_state(state)
}

/// The router wrapped in the HTTP middleware stack used in production.
pub fn create_app(state: AppState) -> Router {
    create_router(state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer())
}

/// Any origin, method and header; credentials allowed. The request's own
/// values are echoed since `*` cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
