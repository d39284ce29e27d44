//! Bearer-token capability.

use async_trait::async_trait;

use crate::error::ApiError;

/// Supplies the bearer token attached to every request.
///
/// Implementations may cache or refresh upstream; the client asks once per
/// request and never caches the result itself.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<String, ApiError>;
}

/// A fixed token, for tests and short-lived tools.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String, ApiError> {
        if self.0.is_empty() {
            return Err(ApiError::Token("static token is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}
