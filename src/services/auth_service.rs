use sha2::{Digest, Sha256};

use crate::config::AuthSettings;
use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer-token gate for the dataset routes.
pub struct AuthService<'a> {
    settings: &'a AuthSettings,
}

impl<'a> AuthService<'a> {
    pub fn new(settings: &'a AuthSettings) -> Self {
        Self { settings }
    }

    /// Checks the raw `Authorization` header value against the configured token.
    ///
    /// `None` covers both a missing header and one that is not valid UTF-8.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        if !self.settings.require_auth {
            return Ok(());
        }

        let expected = self
            .settings
            .token
            .as_deref()
            .ok_or(AuthError::TokenNotConfigured)?;

        let presented = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingCredentials)?;

        if tokens_match(presented, expected) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Exact equality, compared on digests so timing does not track the shared prefix.
fn tokens_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
