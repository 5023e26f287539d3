pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod requests;
pub mod responses;
pub mod routes;

pub use routes::{create_app, create_router, AppState};
