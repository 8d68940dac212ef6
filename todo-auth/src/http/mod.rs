//! HTTP client building with middleware.

mod client;
mod refresh;
mod retry;

pub use client::{AuthenticatedClient, AuthenticatedClientBuilder, HttpClientConfig, REFRESH_PATH};
pub use refresh::{Anonymous, RefreshMiddleware, RefreshResponse};
pub use retry::BackoffPolicy;
