#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use teller_read_api::api::{create_app, AppState};
use teller_read_api::config::{AuthSettings, Settings};

pub const TOKEN: &str = "test-token-123";

pub fn sample_document() -> Value {
    json!({
        "accounts": [
            { "id": "acc_checking", "name": "Everyday Checking", "type": "depository", "subtype": "checking" },
            { "id": "acc_savings", "name": "High Yield Savings", "type": "depository", "subtype": "savings" },
            { "id": "acc_card", "name": "Rewards Card", "type": "credit", "subtype": "credit_card" }
        ],
        "balances": {
            "acc_checking": { "account_id": "acc_checking", "balance": { "available": 100, "ledger": 110 } },
            "acc_savings": { "account_id": "acc_savings", "balance": { "available": null } },
            "acc_card": {}
        },
        "transactions": {
            "acc_checking": {
                "account_id": "acc_checking",
                "transactions": [
                    { "id": "txn_1", "amount": -12.5, "description": "Coffee" },
                    { "id": "txn_2", "amount": -40.0, "description": "Groceries" },
                    { "id": "txn_3", "amount": 1500.0, "description": "Payroll" }
                ]
            },
            "acc_savings": {}
        }
    })
}

/// Writes `document` to a temp file that lives as long as the returned handle.
pub fn write_document(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{}", document).expect("Failed to write document");
    file
}

pub fn settings_for(file: &NamedTempFile, auth: AuthSettings) -> Settings {
    let mut settings = Settings::default();
    settings.data.path = file.path().to_path_buf();
    settings.auth = auth;
    settings
}

pub fn open_auth() -> AuthSettings {
    AuthSettings::resolve(None, None)
}

pub fn token_auth() -> AuthSettings {
    AuthSettings::resolve(Some(TOKEN), None)
}

pub fn app_with(settings: Settings) -> Router {
    create_app(AppState::from_settings(settings))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

pub async fn get(app: &Router, uri: &str, authorization: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
