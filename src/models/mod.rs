pub mod client_config;
pub mod document;

pub use client_config::{compute_backend_mode, BackendMode, BaseConfig, ClientConfig};
pub use document::{AccountRecord, BalanceRecord, Document, TransactionGroup};
