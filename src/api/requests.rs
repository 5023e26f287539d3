use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::num::IntErrorKind;

use crate::error::{AppError, Result};

const LIMIT_PARAM: &str = "limit";

/// Query string accepted by the transactions route.
///
/// The raw pairs are read ourselves so that every malformed query becomes a
/// JSON 422 rather than the extractor's plain-text rejection. A repeated
/// `limit` takes its last value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub limit: Option<i64>,
}

impl TransactionsQuery {
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = pairs
            .into_iter()
            .filter(|(key, _)| key.as_ref() == LIMIT_PARAM)
            .last()
            .map(|(_, value)| value);

        let limit = raw.map(|value| parse_limit(value.as_ref())).transpose()?;
        Ok(Self { limit })
    }
}

/// Parses a signed integer limit. Digit strings beyond the `i64` range
/// saturate, so an oversized positive limit still means "everything".
pub fn parse_limit(raw: &str) -> Result<i64> {
    raw.parse::<i64>().or_else(|e| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(AppError::Validation("limit must be an integer".to_string())),
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for TransactionsQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::Validation(format!("invalid query string: {}", e)))?;
        Self::from_pairs(pairs)
    }
}
