//! Authenticated HTTP client builder with middleware.

use std::time::Duration;

use reqwest_middleware::ClientBuilder;
use reqwest_retry::RetryTransientMiddleware;

use super::{BackoffPolicy, RefreshMiddleware};
use crate::session::TokenStore;

/// Path of the token refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum number of retries for transient failures.
    pub max_retries: u32,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            user_agent: format!("todo-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Authenticated HTTP client with middleware.
pub type AuthenticatedClient = reqwest_middleware::ClientWithMiddleware;

/// Builder for creating authenticated HTTP clients with middleware.
///
/// Provides a fluent API for constructing HTTP clients with:
/// - Bearer authentication from the session token store
/// - Refresh-and-replay on 401 responses
/// - Retry logic with exponential backoff for transient failures
/// - Timeout configuration
pub struct AuthenticatedClientBuilder {
    config: HttpClientConfig,
    base_url: String,
    store: TokenStore,
}

impl AuthenticatedClientBuilder {
    /// Create a new client builder with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL; the refresh endpoint is resolved against it
    /// * `store` - Session token store the middleware reads and updates
    pub fn new(base_url: &str, store: TokenStore) -> Self {
        Self {
            config: HttpClientConfig::default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url, REFRESH_PATH)
    }

    /// Build the configured HTTP client.
    ///
    /// # Returns
    ///
    /// An authenticated HTTP client with retry (outer) and refresh (inner) middleware.
    pub fn build(self) -> Result<AuthenticatedClient, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.clone())
            .build()?;

        // The refresh call goes out on the bare client so it never re-enters the middleware.
        let refresh = RefreshMiddleware::new(self.store.clone(), client.clone(), self.refresh_url());
        let retry_policy = BackoffPolicy::new(self.config.max_retries);

        Ok(ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(refresh)
            .build())
    }
}
