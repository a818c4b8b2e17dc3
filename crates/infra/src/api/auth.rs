//! Access token providers
//!
//! Obtaining a token (OAuth flows, refresh) is outside this crate. The
//! transport asks a provider for a bearer token before every request.

use async_trait::async_trait;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// Implementations that refresh tokens should do so here.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Provider returning a fixed token, e.g. one obtained out of band.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::Auth("no access token configured".into()));
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_its_token() {
        let provider = StaticTokenProvider::new("test-token");
        assert_eq!(provider.access_token().await.unwrap(), "test-token");
    }

    #[tokio::test]
    async fn empty_token_is_an_auth_error() {
        let err = StaticTokenProvider::new("").access_token().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let rendered = format!("{:?}", StaticTokenProvider::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
