pub mod account_service;
pub mod auth_service;
pub mod health_service;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use health_service::{AssetSummary, HealthService};
