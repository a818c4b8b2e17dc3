use std::time::Duration;

use forcelink_domain::constants::DEFAULT_TIMEOUT_SECS;
use forcelink_domain::ForceError;
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Thin wrapper over `reqwest::Client` with a per-request timeout.
///
/// Every request is sent exactly once; callers see transport failures as
/// `ForceError::Network`.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `ForceError::Network` if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, ForceError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send the request once.
    ///
    /// # Errors
    /// Returns the mapped `reqwest` error if the request cannot be built or
    /// no response was received.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ForceError> {
        let request = builder.build().map_err(|err| ForceError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
    bypass_proxy: bool,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            bypass_proxy: false,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Ignore proxies from the environment (`HTTPS_PROXY` and friends).
    ///
    /// Off by default, so the client goes through the system proxy.
    #[must_use]
    pub fn no_proxy(mut self) -> Self {
        self.bypass_proxy = true;
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    #[must_use]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// # Errors
    /// Returns `ForceError::Network` if the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient, ForceError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if self.bypass_proxy {
            builder = builder.no_proxy();
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| ForceError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
